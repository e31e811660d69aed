use alloc::borrow::Cow;

use rgb::RGBA8;

use super::{Cursor, FormatEncoder, Settings};
use crate::reduce;

/// 1 bit per pixel, MSB first. Every row starts on a byte boundary.
#[derive(Debug)]
pub(crate) struct BinaryEncoder {
    pub(super) cursor: Cursor,
    pub(super) settings: Settings,
    bit: u8,
}

impl BinaryEncoder {
    pub fn new(cursor: Cursor, settings: Settings) -> Self {
        Self {
            cursor,
            settings,
            bit: 0,
        }
    }
}

impl FormatEncoder for BinaryEncoder {
    type Pixel = bool;

    fn convert<'a>(&mut self, frame: &'a [RGBA8], width: usize, _label: &str) -> Cow<'a, [bool]> {
        Cow::Owned(reduce::to_mono(frame, width, self.settings.dither))
    }

    #[inline]
    fn encode(&mut self, on: bool) {
        if on != self.settings.invert_alpha {
            self.cursor.set_bits(0x80 >> self.bit);
        }
        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.cursor.advance();
        }
    }

    fn end_row(&mut self) {
        if self.bit != 0 {
            self.bit = 0;
            self.cursor.advance();
        }
    }
}

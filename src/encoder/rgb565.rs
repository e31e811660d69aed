use alloc::borrow::Cow;

use rgb::RGBA8;

use super::{Cursor, FormatEncoder, Settings, chroma_key};
use crate::pixel::{ByteOrder, Transparency};

/// Pack 8-bit channels into 5/6/5 by truncation.
#[inline]
pub(crate) fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16) << 11) | ((g as u16) << 5) | b as u16
}

/// 16-bit color, then an alpha byte under alpha channel.
#[derive(Debug)]
pub(crate) struct Rgb565Encoder {
    pub(super) cursor: Cursor,
    pub(super) settings: Settings,
}

impl Rgb565Encoder {
    pub fn new(cursor: Cursor, settings: Settings) -> Self {
        Self { cursor, settings }
    }
}

impl FormatEncoder for Rgb565Encoder {
    type Pixel = RGBA8;

    fn convert<'a>(&mut self, frame: &'a [RGBA8], _width: usize, _label: &str) -> Cow<'a, [RGBA8]> {
        Cow::Borrowed(frame)
    }

    #[inline]
    fn encode(&mut self, px: RGBA8) {
        let (mut r, mut g, mut b) = (px.r >> 3, px.g >> 2, px.b >> 3);
        if self.settings.transparency == Transparency::ChromaKey {
            (r, g, b) = chroma_key(r, g, b, px.a);
        }
        let rgb = pack_rgb565(r, g, b);
        match self.settings.byte_order {
            ByteOrder::BigEndian => self.cursor.push_all(&rgb.to_be_bytes()),
            ByteOrder::LittleEndian => self.cursor.push_all(&rgb.to_le_bytes()),
        }
        if self.settings.transparency == Transparency::AlphaChannel {
            let a = if self.settings.invert_alpha {
                px.a ^ 0xFF
            } else {
                px.a
            };
            self.cursor.push(a);
        }
    }
}

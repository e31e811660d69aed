use alloc::borrow::Cow;

use rgb::RGBA8;

use super::{Cursor, FormatEncoder, Settings};
use crate::pixel::Transparency;
use crate::reduce::{self, LumaAlpha};

/// Luma reserved for transparent pixels under chroma-key.
pub(crate) const GRAY_SENTINEL: u8 = 1;

/// One byte per pixel. Alpha never gets its own byte: under chroma-key it
/// becomes the sentinel, under alpha channel it replaces the luma.
#[derive(Debug)]
pub(crate) struct GrayscaleEncoder {
    pub(super) cursor: Cursor,
    pub(super) settings: Settings,
}

impl GrayscaleEncoder {
    pub fn new(cursor: Cursor, settings: Settings) -> Self {
        Self { cursor, settings }
    }

    pub fn transparency(&self) -> Transparency {
        self.settings.transparency
    }
}

impl FormatEncoder for GrayscaleEncoder {
    type Pixel = LumaAlpha;

    fn convert<'a>(
        &mut self,
        frame: &'a [RGBA8],
        _width: usize,
        label: &str,
    ) -> Cow<'a, [LumaAlpha]> {
        if !reduce::is_alpha_only(frame) {
            return Cow::Owned(reduce::to_luma_alpha(frame));
        }
        if self.settings.transparency != Transparency::AlphaChannel {
            if self.cursor.position() == 0 {
                log::warn!(
                    "grayscale image {label} is alpha only, but transparency is set to {:?}; \
                     packing as alpha channel",
                    self.settings.transparency
                );
                self.settings.transparency = Transparency::AlphaChannel;
            } else {
                log::warn!(
                    "grayscale image {label} has an alpha-only frame after opaque frames; \
                     packing its alpha as luma"
                );
            }
        }
        Cow::Owned(reduce::alpha_as_luma(frame))
    }

    #[inline]
    fn encode(&mut self, px: LumaAlpha) {
        let mut b = px.luma;
        let transparency = self.settings.transparency;
        if transparency == Transparency::ChromaKey {
            if b == GRAY_SENTINEL {
                b = 0;
            }
            if px.alpha != 0xFF {
                b = GRAY_SENTINEL;
            }
        }
        if self.settings.invert_alpha {
            b ^= 0xFF;
        }
        if transparency == Transparency::AlphaChannel && px.alpha != 0xFF {
            b = px.alpha;
        }
        self.cursor.push(b);
    }
}

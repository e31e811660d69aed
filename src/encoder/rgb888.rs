use alloc::borrow::Cow;

use rgb::RGBA8;

use super::{Cursor, FormatEncoder, Settings, chroma_key};
use crate::pixel::Transparency;

/// R, G, B bytes, then alpha under alpha channel.
#[derive(Debug)]
pub(crate) struct RgbEncoder {
    pub(super) cursor: Cursor,
    pub(super) settings: Settings,
}

impl RgbEncoder {
    pub fn new(cursor: Cursor, settings: Settings) -> Self {
        Self { cursor, settings }
    }
}

impl FormatEncoder for RgbEncoder {
    type Pixel = RGBA8;

    fn convert<'a>(&mut self, frame: &'a [RGBA8], _width: usize, _label: &str) -> Cow<'a, [RGBA8]> {
        Cow::Borrowed(frame)
    }

    #[inline]
    fn encode(&mut self, px: RGBA8) {
        let (r, g, b) = match self.settings.transparency {
            Transparency::ChromaKey => chroma_key(px.r, px.g, px.b, px.a),
            _ => (px.r, px.g, px.b),
        };
        self.cursor.push_all(&[r, g, b]);
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

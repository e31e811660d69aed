//! Per-format pixel packers.
//!
//! Each packer owns a [`Cursor`] over a zero-filled buffer sized by
//! [`crate::buffer_size`], receives one reduced pixel per `encode` call and
//! one `end_row` per source row. [`Encoder`] is the closed set of packers;
//! the pixel loop is monomorphized per format through [`FormatEncoder`].

mod binary;
mod grayscale;
mod rgb565;
mod rgb888;

pub(crate) use binary::BinaryEncoder;
pub(crate) use grayscale::GrayscaleEncoder;
pub(crate) use rgb565::Rgb565Encoder;
pub(crate) use rgb888::RgbEncoder;

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGBA8;

use crate::error::EncodeError;
use crate::pixel::{ByteOrder, Dither, PixelFormat, Transparency};

/// Settings fixed for the whole pass.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Settings {
    pub transparency: Transparency,
    pub invert_alpha: bool,
    pub byte_order: ByteOrder,
    pub dither: Dither,
}

/// Write position into the packed buffer.
///
/// Writes past the end are dropped and still advance the position, so an
/// overrun shows up as a size mismatch in [`Cursor::finish`] instead of a
/// panic.
#[derive(Debug)]
pub(crate) struct Cursor {
    buf: Vec<u8>,
    pos: usize,
}

impl Cursor {
    pub fn new(size: usize) -> Self {
        Self {
            buf: vec![0; size],
            pos: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        if let Some(slot) = self.buf.get_mut(self.pos) {
            *slot = byte;
        }
        self.pos += 1;
    }

    #[inline]
    pub fn push_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// OR `mask` into the byte under the cursor without advancing.
    #[inline]
    pub fn set_bits(&mut self, mask: u8) {
        if let Some(slot) = self.buf.get_mut(self.pos) {
            *slot |= mask;
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// The filled buffer, if exactly every byte was written.
    pub fn finish(self) -> Result<Vec<u8>, EncodeError> {
        if self.pos != self.buf.len() {
            return Err(EncodeError::SizeMismatch {
                expected: self.buf.len(),
                actual: self.pos,
            });
        }
        Ok(self.buf)
    }
}

/// One packed format: a reduction step and a per-pixel state machine.
pub(crate) trait FormatEncoder {
    /// What a pixel looks like after [`FormatEncoder::convert`].
    type Pixel: Copy;

    /// Reduce one frame to this format's pixel type. Runs before the
    /// frame's first `encode`.
    fn convert<'a>(&mut self, frame: &'a [RGBA8], width: usize, label: &str)
    -> Cow<'a, [Self::Pixel]>;

    fn encode(&mut self, pixel: Self::Pixel);

    /// Close the current row. Only sub-byte formats have anything to flush.
    fn end_row(&mut self) {}
}

/// Pack one frame: `height` rows of `width` pixels, top to bottom.
fn encode_frame<E: FormatEncoder>(
    encoder: &mut E,
    frame: &[RGBA8],
    width: usize,
    label: &str,
    stop: &dyn Stop,
) -> Result<(), EncodeError> {
    let pixels = encoder.convert(frame, width, label);
    if width == 0 {
        return Ok(());
    }
    for (row_idx, row) in pixels.chunks_exact(width).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for &px in row {
            encoder.encode(px);
        }
        encoder.end_row();
    }
    Ok(())
}

/// The packer for one image, chosen by [`PixelFormat`].
#[derive(Debug)]
pub(crate) enum Encoder {
    Binary(BinaryEncoder),
    Grayscale(GrayscaleEncoder),
    Rgb565(Rgb565Encoder),
    Rgb(RgbEncoder),
}

impl Encoder {
    /// A packer writing into a zeroed buffer of `size` bytes.
    pub fn new(format: PixelFormat, size: usize, settings: Settings) -> Self {
        let cursor = Cursor::new(size);
        match format {
            PixelFormat::Binary => Self::Binary(BinaryEncoder::new(cursor, settings)),
            PixelFormat::Grayscale => Self::Grayscale(GrayscaleEncoder::new(cursor, settings)),
            PixelFormat::Rgb565 => Self::Rgb565(Rgb565Encoder::new(cursor, settings)),
            PixelFormat::Rgb => Self::Rgb(RgbEncoder::new(cursor, settings)),
        }
    }

    /// Pack one full frame of `width`-wide rows.
    pub fn encode_frame(
        &mut self,
        frame: &[RGBA8],
        width: usize,
        label: &str,
        stop: &dyn Stop,
    ) -> Result<(), EncodeError> {
        match self {
            Self::Binary(e) => encode_frame(e, frame, width, label, stop),
            Self::Grayscale(e) => encode_frame(e, frame, width, label, stop),
            Self::Rgb565(e) => encode_frame(e, frame, width, label, stop),
            Self::Rgb(e) => encode_frame(e, frame, width, label, stop),
        }
    }

    /// Transparency actually packed. Grayscale may switch to alpha channel
    /// for alpha-only sources.
    pub fn transparency(&self) -> Transparency {
        match self {
            Self::Binary(e) => e.settings.transparency,
            Self::Grayscale(e) => e.transparency(),
            Self::Rgb565(e) => e.settings.transparency,
            Self::Rgb(e) => e.settings.transparency,
        }
    }

    pub fn finish(self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::Binary(e) => e.cursor.finish(),
            Self::Grayscale(e) => e.cursor.finish(),
            Self::Rgb565(e) => e.cursor.finish(),
            Self::Rgb(e) => e.cursor.finish(),
        }
    }
}

/// Chroma-key sentinel shared by the RGB family: pure `(0, 1, 0)`.
///
/// Transparent pixels (alpha below 128) become the sentinel; opaque pixels
/// that happen to equal it are nudged to `(0, 0, 0)`. `r`, `g`, `b` are in
/// the format's own channel precision.
#[inline]
pub(crate) fn chroma_key(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8) {
    if a < 128 {
        (0, 1, 0)
    } else if (r, g, b) == (0, 1, 0) {
        (0, 0, 0)
    } else {
        (r, g, b)
    }
}

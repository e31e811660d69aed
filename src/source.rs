//! Decoded pixel input.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use rgb::RGBA8;

use crate::error::EncodeError;
use crate::size::frame_pixels;

/// Frame-indexable source of row-major RGBA pixels at a fixed size.
///
/// Each frame must hold exactly `width * height` pixels. Frames are
/// requested in order `0..frame_count()`, once each.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Number of animation frames. Static images have one.
    fn frame_count(&self) -> u32 {
        1
    }

    /// Pixels of frame `index`, top row first.
    fn frame(&self, index: u32) -> Result<Cow<'_, [RGBA8]>, EncodeError>;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn frame_count(&self) -> u32 {
        (**self).frame_count()
    }
    fn frame(&self, index: u32) -> Result<Cow<'_, [RGBA8]>, EncodeError> {
        (**self).frame(index)
    }
}

/// Owned frames of equal size, in animation order.
#[derive(Clone, Debug)]
pub struct Frames {
    width: u32,
    height: u32,
    frames: Vec<Vec<RGBA8>>,
}

impl Frames {
    /// An empty animation; add frames with [`Frames::push`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
        }
    }

    /// A single still frame.
    pub fn single(width: u32, height: u32, pixels: Vec<RGBA8>) -> Result<Self, EncodeError> {
        let mut frames = Self::new(width, height);
        frames.push(pixels)?;
        Ok(frames)
    }

    /// A single still frame from packed RGBA bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, EncodeError> {
        if bytes.len() % 4 != 0 {
            return Err(EncodeError::Source(alloc::format!(
                "RGBA byte length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Self::single(width, height, pixels)
    }

    /// Append a frame. Its pixel count must match the frame size.
    pub fn push(&mut self, pixels: Vec<RGBA8>) -> Result<(), EncodeError> {
        let expected = frame_pixels(self.width, self.height)?;
        if pixels.len() != expected {
            return Err(EncodeError::SourceMismatch {
                frame: self.frames.len() as u32,
                expected,
                actual: pixels.len(),
            });
        }
        self.frames.push(pixels);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl PixelSource for Frames {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    fn frame(&self, index: u32) -> Result<Cow<'_, [RGBA8]>, EncodeError> {
        self.frames
            .get(index as usize)
            .map(|f| Cow::Borrowed(f.as_slice()))
            .ok_or_else(|| missing_frame(index, self.frames.len()))
    }
}

fn missing_frame(index: u32, available: usize) -> EncodeError {
    EncodeError::Source(alloc::format!(
        "frame {index} requested, source has {available}"
    ))
}

/// Rows of a possibly strided image, borrowed when they are contiguous.
#[cfg(feature = "imgref")]
fn imgref_frame<'a>(
    img: imgref::ImgRef<'a, RGBA8>,
    index: u32,
) -> Result<Cow<'a, [RGBA8]>, EncodeError> {
    if index != 0 {
        return Err(missing_frame(index, 1));
    }
    let (w, h, stride) = (img.width(), img.height(), img.stride());
    let buf: &'a [RGBA8] = *img.buf();
    if stride == w {
        return Ok(Cow::Borrowed(&buf[..w * h]));
    }
    Ok(Cow::Owned(
        (0..h)
            .flat_map(|y| &buf[y * stride..y * stride + w])
            .copied()
            .collect(),
    ))
}

/// A single still frame.
#[cfg(feature = "imgref")]
impl PixelSource for imgref::ImgRef<'_, RGBA8> {
    fn width(&self) -> u32 {
        imgref::Img::width(self) as u32
    }

    fn height(&self) -> u32 {
        imgref::Img::height(self) as u32
    }

    fn frame(&self, index: u32) -> Result<Cow<'_, [RGBA8]>, EncodeError> {
        imgref_frame(*self, index)
    }
}

/// A single still frame.
#[cfg(feature = "imgref")]
impl PixelSource for imgref::ImgVec<RGBA8> {
    fn width(&self) -> u32 {
        imgref::Img::width(self) as u32
    }

    fn height(&self) -> u32 {
        imgref::Img::height(self) as u32
    }

    fn frame(&self, index: u32) -> Result<Cow<'_, [RGBA8]>, EncodeError> {
        imgref_frame(self.as_ref(), index)
    }
}

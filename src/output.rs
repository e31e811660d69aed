use alloc::vec::Vec;

use crate::pixel::{ByteOrder, PixelFormat, Transparency};

/// A packed image buffer and the metadata a firmware decoder needs to
/// read it back.
///
/// Frames are stacked vertically: the buffer holds `height * frame_count`
/// rows, frame 0 first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    data: Vec<u8>,
    pub width: u32,
    /// Height of one frame.
    pub height: u32,
    pub frame_count: u32,
    pub format: PixelFormat,
    /// Transparency the bytes were packed with.
    pub transparency: Transparency,
    /// Word order of RGB565 pixels; `None` for other formats.
    pub byte_order: Option<ByteOrder>,
    placeholder: bool,
}

impl EncodedImage {
    pub(crate) fn packed(
        data: Vec<u8>,
        width: u32,
        height: u32,
        frame_count: u32,
        format: PixelFormat,
        transparency: Transparency,
        byte_order: Option<ByteOrder>,
    ) -> Self {
        Self {
            data,
            width,
            height,
            frame_count,
            format,
            transparency,
            byte_order,
            placeholder: false,
        }
    }

    pub(crate) fn into_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    /// The packed bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the packed bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Whether the buffer is zero-filled storage for bytes loaded at
    /// device runtime rather than packed pixels.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Rows in the buffer across all frames.
    pub fn total_rows(&self) -> usize {
        self.height as usize * self.frame_count as usize
    }

    /// Bytes per packed row.
    pub fn row_stride(&self) -> usize {
        self.data.len().checked_div(self.total_rows()).unwrap_or(0)
    }

    /// Packed bytes of frame `index`, or `None` past the last frame.
    pub fn frame(&self, index: u32) -> Option<&[u8]> {
        if index >= self.frame_count {
            return None;
        }
        let frame_len = self.row_stride() * self.height as usize;
        let start = frame_len * index as usize;
        self.data.get(start..start + frame_len)
    }
}

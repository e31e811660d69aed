//! Exact packed buffer sizes, computed without pixel data.

use crate::error::EncodeError;
use crate::pixel::{PixelFormat, Transparency};

/// Bytes in one packed row.
///
/// Binary rows are padded up to whole bytes, so `ceil(width / 8)`.
pub fn row_bytes(
    format: PixelFormat,
    width: u32,
    transparency: Transparency,
) -> Result<usize, EncodeError> {
    let w = width as usize;
    match format.bytes_per_pixel(transparency) {
        Some(bpp) => w.checked_mul(bpp),
        None => Some(w.div_ceil(8)),
    }
    .ok_or(EncodeError::DimensionsTooLarge { width, height: 1 })
}

/// Total packed size for `frame_count` frames of `width`×`height`,
/// stacked vertically into `height * frame_count` rows.
///
/// This is exactly the number of bytes a full encode pass writes.
pub fn buffer_size(
    format: PixelFormat,
    width: u32,
    height: u32,
    frame_count: u32,
    transparency: Transparency,
) -> Result<usize, EncodeError> {
    let too_large = EncodeError::DimensionsTooLarge { width, height };
    let rows = (height as usize)
        .checked_mul(frame_count as usize)
        .ok_or(too_large)?;
    row_bytes(format, width, transparency)?
        .checked_mul(rows)
        .ok_or(EncodeError::DimensionsTooLarge { width, height })
}

/// Pixels in one frame. Binary buffers are an eighth of this, so a frame
/// can fit [`buffer_size`] and still overflow here on 32-bit targets.
pub(crate) fn frame_pixels(width: u32, height: u32) -> Result<usize, EncodeError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(EncodeError::DimensionsTooLarge { width, height })
}

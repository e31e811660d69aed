use alloc::string::String;
use enough::StopReason;

use crate::pixel::{PixelFormat, Transparency};

/// Errors from buffer sizing and image packing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("image format {format:?} cannot have transparency {transparency:?}")]
    IllegalTransparency {
        format: PixelFormat,
        transparency: Transparency,
    },

    #[error("no alpha channel to invert for {format:?} with {transparency:?}")]
    NoAlphaToInvert {
        format: PixelFormat,
        transparency: Transparency,
    },

    #[error("image format {0:?} does not support byte order configuration")]
    ByteOrderUnsupported(PixelFormat),

    #[error("invalid dimensions: {width}x{height} with {frames} frame(s)")]
    InvalidDimensions { width: u32, height: u32, frames: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel source error: {0}")]
    Source(String),

    #[error("frame {frame} has {actual} pixels, expected {expected}")]
    SourceMismatch {
        frame: u32,
        expected: usize,
        actual: usize,
    },

    #[error("encoder wrote {actual} bytes, buffer size is {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl EncodeError {
    /// Whether this error comes from an invalid request rather than from
    /// the pixel source or the encoder itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::IllegalTransparency { .. }
                | Self::NoAlphaToInvert { .. }
                | Self::ByteOrderUnsupported(_)
                | Self::InvalidDimensions { .. }
        )
    }
}

impl From<StopReason> for EncodeError {
    fn from(r: StopReason) -> Self {
        EncodeError::Cancelled(r)
    }
}

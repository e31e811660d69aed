use alloc::format;

use crate::error::EncodeError;

/// Resource limits for packing and placeholder allocation.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count per frame (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the packed output buffer.
    pub max_memory_bytes: Option<u64>,
}

/// Placeholder buffers above this size get a warning.
pub(crate) const PLACEHOLDER_WARN_BYTES: usize = 4 * 1024 * 1024;

/// Default ceiling for runtime-populated placeholder buffers.
pub(crate) const PLACEHOLDER_MAX_BYTES: u64 = 8 * 1024 * 1024;

impl Limits {
    /// Limits applied to placeholder buffers when the caller sets none.
    pub fn placeholder() -> Self {
        Self {
            max_memory_bytes: Some(PLACEHOLDER_MAX_BYTES),
            ..Default::default()
        }
    }

    /// Reject frame dimensions over the width, height or pixel caps.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), EncodeError> {
        if let Some(max) = self.max_width
            && u64::from(width) > max
        {
            return Err(EncodeError::LimitExceeded(format!(
                "frame width {width} over the {max} pixel cap"
            )));
        }
        if let Some(max) = self.max_height
            && u64::from(height) > max
        {
            return Err(EncodeError::LimitExceeded(format!(
                "frame height {height} over the {max} pixel cap"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels
            && pixels > max
        {
            return Err(EncodeError::LimitExceeded(format!(
                "{width}x{height} frame has {pixels} pixels, cap is {max}"
            )));
        }
        Ok(())
    }

    /// Reject a packed buffer larger than `max_memory_bytes`. `what` names
    /// the buffer in the error: a packed image or a placeholder.
    pub(crate) fn check_memory(&self, what: &str, bytes: usize) -> Result<(), EncodeError> {
        match self.max_memory_bytes {
            Some(max) if bytes as u64 > max => Err(EncodeError::LimitExceeded(format!(
                "{what} needs {bytes} bytes, device budget is {max}"
            ))),
            _ => Ok(()),
        }
    }
}

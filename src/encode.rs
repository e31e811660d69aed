use alloc::vec;

use enough::Stop;
use rgb::RGBA8;

use crate::encoder::{Encoder, Settings};
use crate::error::EncodeError;
use crate::limits::{Limits, PLACEHOLDER_WARN_BYTES};
use crate::output::EncodedImage;
use crate::pixel::{ByteOrder, Dither, PixelFormat, Transparency};
use crate::policy;
use crate::size::{buffer_size, frame_pixels};
use crate::source::{Frames, PixelSource};

/// Builder for packing one image.
///
/// Settings are validated when [`EncodeRequest::encode`] or
/// [`EncodeRequest::placeholder`] runs, before any buffer is allocated.
#[derive(Clone, Debug)]
pub struct EncodeRequest<'a> {
    format: PixelFormat,
    transparency: Transparency,
    invert_alpha: bool,
    byte_order: Option<ByteOrder>,
    dither: Dither,
    limits: Option<&'a Limits>,
    label: &'a str,
}

impl<'a> EncodeRequest<'a> {
    /// Pack as `format`, opaque, no dithering.
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format,
            transparency: Transparency::Opaque,
            invert_alpha: false,
            byte_order: None,
            dither: Dither::None,
            limits: None,
            label: "image",
        }
    }

    /// 1-bit monochrome.
    pub fn binary() -> Self {
        Self::new(PixelFormat::Binary)
    }

    /// 8-bit luma.
    pub fn grayscale() -> Self {
        Self::new(PixelFormat::Grayscale)
    }

    /// 16-bit 5/6/5 color.
    pub fn rgb565() -> Self {
        Self::new(PixelFormat::Rgb565)
    }

    /// 24-bit color.
    pub fn rgb() -> Self {
        Self::new(PixelFormat::Rgb)
    }

    pub fn with_transparency(mut self, transparency: Transparency) -> Self {
        self.transparency = transparency;
        self
    }

    /// Invert stored alpha, or the mono bit for binary images.
    pub fn with_invert_alpha(mut self, invert: bool) -> Self {
        self.invert_alpha = invert;
        self
    }

    /// Word order for RGB565. Rejected for other formats.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = Some(order);
        self
    }

    /// Error diffusion for 1-bit reduction. Other formats ignore it.
    pub fn with_dither(mut self, dither: Dither) -> Self {
        self.dither = dither;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Name used in log messages.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Check the settings against the format's transparency rules.
    pub fn validate(&self) -> Result<(), EncodeError> {
        policy::check_settings(
            self.format,
            self.transparency,
            self.invert_alpha,
            self.byte_order,
        )
    }

    /// Packed size for this request's format and transparency.
    pub fn buffer_size(&self, width: u32, height: u32, frame_count: u32) -> Result<usize, EncodeError> {
        buffer_size(self.format, width, height, frame_count, self.transparency)
    }

    /// Pack every frame of `source`, in order.
    ///
    /// Returns the complete buffer or an error; never a partial buffer.
    pub fn encode<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        stop: impl Stop,
    ) -> Result<EncodedImage, EncodeError> {
        self.validate()?;
        let (width, height, frames) = (source.width(), source.height(), source.frame_count());
        let size = self.checked_size("packed image", width, height, frames, self.limits)?;
        stop.check()?;

        log::debug!(
            "packing {} as {:?}/{:?}: {width}x{height}, {frames} frame(s), {size} bytes",
            self.label,
            self.format,
            self.transparency
        );

        let settings = Settings {
            transparency: self.transparency,
            invert_alpha: self.invert_alpha,
            byte_order: self.byte_order.unwrap_or_default(),
            dither: self.dither,
        };
        let mut encoder = Encoder::new(self.format, size, settings);
        let w = width as usize;
        let expected = frame_pixels(width, height)?;

        for index in 0..frames {
            stop.check()?;
            let frame = source.frame(index)?;
            if frame.len() != expected {
                return Err(EncodeError::SourceMismatch {
                    frame: index,
                    expected,
                    actual: frame.len(),
                });
            }
            encoder.encode_frame(&frame, w, self.label, &stop)?;
        }

        let transparency = encoder.transparency();
        let data = encoder.finish()?;
        Ok(EncodedImage::packed(
            data,
            width,
            height,
            frames,
            self.format,
            transparency,
            self.effective_byte_order(),
        ))
    }

    /// Pack a single frame of RGBA pixels.
    pub fn encode_rgba(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<EncodedImage, EncodeError> {
        let frames = Frames::single(width, height, pixels.to_vec())?;
        self.encode(&frames, stop)
    }

    /// A zero-filled buffer of the exact packed size, for images whose
    /// bytes are loaded at device runtime.
    ///
    /// Uses [`Limits::placeholder`] unless limits were set on the request.
    pub fn placeholder(&self, width: u32, height: u32) -> Result<EncodedImage, EncodeError> {
        self.validate()?;
        let default_limits = Limits::placeholder();
        let limits = self.limits.unwrap_or(&default_limits);
        let size = self.checked_size("placeholder", width, height, 1, Some(limits))?;
        if size > PLACEHOLDER_WARN_BYTES {
            log::warn!(
                "placeholder for {} is {:.1} MiB; make sure the device has enough PSRAM",
                self.label,
                size as f64 / (1024.0 * 1024.0)
            );
        }
        Ok(EncodedImage::packed(
            vec![0; size],
            width,
            height,
            1,
            self.format,
            self.transparency,
            self.effective_byte_order(),
        )
        .into_placeholder())
    }

    fn checked_size(
        &self,
        what: &str,
        width: u32,
        height: u32,
        frames: u32,
        limits: Option<&Limits>,
    ) -> Result<usize, EncodeError> {
        if width == 0 || height == 0 || frames == 0 {
            return Err(EncodeError::InvalidDimensions {
                width,
                height,
                frames,
            });
        }
        if let Some(limits) = limits {
            limits.check(width, height)?;
        }
        let size = self.buffer_size(width, height, frames)?;
        if let Some(limits) = limits {
            limits.check_memory(what, size)?;
        }
        Ok(size)
    }

    fn effective_byte_order(&self) -> Option<ByteOrder> {
        self.format
            .supports_byte_order()
            .then(|| self.byte_order.unwrap_or_default())
    }
}

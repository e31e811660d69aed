//! Which transparency settings each packed format accepts.
//!
//! Checked once, before a buffer is sized or filled. Encoders assume the
//! settings they receive passed these checks.

use crate::error::EncodeError;
use crate::pixel::{ByteOrder, PixelFormat, Transparency};

/// Whether `format` can carry `transparency`.
///
/// Binary has no room for an alpha channel; every other format accepts
/// all three modes.
pub fn is_legal(format: PixelFormat, transparency: Transparency) -> bool {
    !matches!(
        (format, transparency),
        (PixelFormat::Binary, Transparency::AlphaChannel)
    )
}

/// Whether invert-alpha means anything for this combination.
///
/// Binary defines inversion on the mono bit itself. The other formats only
/// invert a stored alpha value.
pub fn can_invert_alpha(format: PixelFormat, transparency: Transparency) -> bool {
    format == PixelFormat::Binary || transparency == Transparency::AlphaChannel
}

/// Validate a full set of packing settings.
pub fn check_settings(
    format: PixelFormat,
    transparency: Transparency,
    invert_alpha: bool,
    byte_order: Option<ByteOrder>,
) -> Result<(), EncodeError> {
    if !is_legal(format, transparency) {
        return Err(EncodeError::IllegalTransparency {
            format,
            transparency,
        });
    }
    if invert_alpha && !can_invert_alpha(format, transparency) {
        return Err(EncodeError::NoAlphaToInvert {
            format,
            transparency,
        });
    }
    if byte_order.is_some() && !format.supports_byte_order() {
        return Err(EncodeError::ByteOrderUnsupported(format));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legality_table() {
        use PixelFormat::*;
        use Transparency::*;
        for format in PixelFormat::ALL {
            assert!(is_legal(format, Opaque));
            assert!(is_legal(format, ChromaKey));
        }
        assert!(!is_legal(Binary, AlphaChannel));
        assert!(is_legal(Grayscale, AlphaChannel));
        assert!(is_legal(Rgb565, AlphaChannel));
        assert!(is_legal(Rgb, AlphaChannel));
    }

    #[test]
    fn binary_inverts_without_alpha() {
        assert!(check_settings(PixelFormat::Binary, Transparency::Opaque, true, None).is_ok());
        assert!(check_settings(PixelFormat::Binary, Transparency::ChromaKey, true, None).is_ok());
    }

    #[test]
    fn color_formats_need_alpha_to_invert() {
        for format in [PixelFormat::Grayscale, PixelFormat::Rgb565, PixelFormat::Rgb] {
            for transparency in [Transparency::Opaque, Transparency::ChromaKey] {
                let err = check_settings(format, transparency, true, None).unwrap_err();
                assert!(matches!(err, EncodeError::NoAlphaToInvert { .. }));
                assert!(err.is_configuration());
            }
            assert!(check_settings(format, Transparency::AlphaChannel, true, None).is_ok());
        }
    }

    #[test]
    fn byte_order_only_for_rgb565() {
        let order = Some(ByteOrder::LittleEndian);
        assert!(check_settings(PixelFormat::Rgb565, Transparency::Opaque, false, order).is_ok());
        for format in [PixelFormat::Binary, PixelFormat::Grayscale, PixelFormat::Rgb] {
            assert!(matches!(
                check_settings(format, Transparency::Opaque, false, order),
                Err(EncodeError::ByteOrderUnsupported(f)) if f == format
            ));
        }
    }

    #[test]
    fn illegal_pair_reported_first() {
        let err = check_settings(PixelFormat::Binary, Transparency::AlphaChannel, true, None)
            .unwrap_err();
        assert!(matches!(err, EncodeError::IllegalTransparency { .. }));
    }
}

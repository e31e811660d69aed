/// Packed pixel encoding of the output buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1 bit per pixel, MSB first, rows padded to whole bytes.
    Binary,
    /// 1 byte per pixel: luma, or alpha where the pixel is not opaque.
    Grayscale,
    /// 16-bit 5/6/5 color, optionally followed by an 8-bit alpha byte.
    Rgb565,
    /// 8 bits per channel R, G, B, optionally followed by alpha.
    Rgb,
}

/// How transparency is carried in the packed buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transparency {
    /// No transparency; alpha is ignored.
    #[default]
    Opaque,
    /// A reserved sentinel value marks transparent pixels.
    ChromaKey,
    /// Alpha is stored explicitly.
    AlphaChannel,
}

/// Byte order of 16-bit RGB565 words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Error diffusion used when reducing to 1-bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dither {
    /// Plain threshold at mid-gray.
    #[default]
    None,
    /// Floyd–Steinberg error diffusion.
    FloydSteinberg,
}

impl PixelFormat {
    /// All formats, in declaration order.
    pub const ALL: [PixelFormat; 4] = [
        PixelFormat::Binary,
        PixelFormat::Grayscale,
        PixelFormat::Rgb565,
        PixelFormat::Rgb,
    ];

    /// Bits per pixel in the packed buffer.
    pub fn bits_per_pixel(&self, transparency: Transparency) -> usize {
        let alpha = transparency == Transparency::AlphaChannel;
        match self {
            Self::Binary => 1,
            Self::Grayscale => 8,
            Self::Rgb565 if alpha => 24,
            Self::Rgb565 => 16,
            Self::Rgb if alpha => 32,
            Self::Rgb => 24,
        }
    }

    /// Whole bytes per pixel, or `None` for sub-byte formats.
    pub fn bytes_per_pixel(&self, transparency: Transparency) -> Option<usize> {
        match self.bits_per_pixel(transparency) {
            bits if bits % 8 == 0 => Some(bits / 8),
            _ => None,
        }
    }

    /// Whether the 16-bit word order can be chosen.
    pub fn supports_byte_order(&self) -> bool {
        matches!(self, Self::Rgb565)
    }
}

impl Transparency {
    pub const ALL: [Transparency; 3] = [
        Transparency::Opaque,
        Transparency::ChromaKey,
        Transparency::AlphaChannel,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_adds_a_byte_to_color_formats() {
        use Transparency::*;
        assert_eq!(PixelFormat::Rgb565.bytes_per_pixel(Opaque), Some(2));
        assert_eq!(PixelFormat::Rgb565.bytes_per_pixel(AlphaChannel), Some(3));
        assert_eq!(PixelFormat::Rgb.bytes_per_pixel(ChromaKey), Some(3));
        assert_eq!(PixelFormat::Rgb.bytes_per_pixel(AlphaChannel), Some(4));
    }

    #[test]
    fn grayscale_folds_alpha_into_one_byte() {
        for t in Transparency::ALL {
            assert_eq!(PixelFormat::Grayscale.bytes_per_pixel(t), Some(1));
        }
    }

    #[test]
    fn binary_is_sub_byte() {
        assert_eq!(PixelFormat::Binary.bits_per_pixel(Transparency::Opaque), 1);
        assert_eq!(PixelFormat::Binary.bytes_per_pixel(Transparency::Opaque), None);
    }

    #[test]
    fn only_rgb565_has_byte_order() {
        let with_order: alloc::vec::Vec<_> = PixelFormat::ALL
            .into_iter()
            .filter(PixelFormat::supports_byte_order)
            .collect();
        assert_eq!(with_order, [PixelFormat::Rgb565]);
    }
}

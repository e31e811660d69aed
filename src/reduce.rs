//! Channel reduction run before a frame is packed.
//!
//! Binary consumes one bit per pixel, Grayscale a luma/alpha pair, and the
//! color formats the RGBA pixels unchanged.

use alloc::vec;
use alloc::vec::Vec;

use rgb::RGBA8;

use crate::pixel::Dither;

/// Luma plus alpha, the input of the grayscale encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LumaAlpha {
    pub luma: u8,
    pub alpha: u8,
}

/// Whether a frame carries its picture only in the alpha channel.
///
/// True when alpha is not uniformly opaque and every color channel is
/// zero everywhere. Icon fonts rasterized to black-on-transparent look
/// like this.
pub fn is_alpha_only(pixels: &[RGBA8]) -> bool {
    if pixels.iter().all(|p| p.a == 0xFF) {
        return false;
    }
    pixels.iter().all(|p| p.r == 0 && p.g == 0 && p.b == 0)
}

/// ITU-R 601-2 luma in 16-bit fixed point, rounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// ITU-R 601-2 luma in thousandths, truncated. The 1-bit path thresholds
/// on this rather than on [`luma`]: `(128, 128, 126)` is 127.772 and stays
/// off, where the rounded value would be 128.
#[inline]
pub fn bilevel_luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Reduce to one bit per pixel.
///
/// Alpha-only frames use alpha as the intensity; everything else uses
/// [`bilevel_luma`]. Without dithering a pixel is on at 128 and above.
pub fn to_mono(pixels: &[RGBA8], width: usize, dither: Dither) -> Vec<bool> {
    let intensity: Vec<u8> = if is_alpha_only(pixels) {
        pixels.iter().map(|p| p.a).collect()
    } else {
        pixels.iter().map(|p| bilevel_luma(p.r, p.g, p.b)).collect()
    };
    match dither {
        Dither::None => intensity.iter().map(|&v| v >= 128).collect(),
        Dither::FloydSteinberg => floyd_steinberg(&intensity, width),
    }
}

/// Reduce to luma/alpha pairs. Alpha is carried through untouched.
pub fn to_luma_alpha(pixels: &[RGBA8]) -> Vec<LumaAlpha> {
    pixels
        .iter()
        .map(|p| LumaAlpha {
            luma: luma(p.r, p.g, p.b),
            alpha: p.a,
        })
        .collect()
}

/// Use the alpha plane as opaque luma.
pub fn alpha_as_luma(pixels: &[RGBA8]) -> Vec<LumaAlpha> {
    pixels
        .iter()
        .map(|p| LumaAlpha {
            luma: p.a,
            alpha: 0xFF,
        })
        .collect()
}

/// Floyd–Steinberg to 1 bit, left to right on every row.
///
/// Error weights: 7/16 right, 3/16 below-left, 5/16 below, 1/16 below-right.
/// The carried error is summed before the divide, which truncates toward
/// zero. A pixel is on only strictly above 128.
fn floyd_steinberg(intensity: &[u8], width: usize) -> Vec<bool> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(intensity.len());
    // Error carried into the current and next row, offset by one so the
    // below-left tap at x = 0 has somewhere to land.
    let mut cur = vec![0i32; width + 2];
    let mut next = vec![0i32; width + 2];

    for row in intensity.chunks(width) {
        for (x, &v) in row.iter().enumerate() {
            let value = (v as i32 + cur[x + 1] / 16).clamp(0, 255);
            let on = value > 128;
            out.push(on);
            let err = value - if on { 255 } else { 0 };
            cur[x + 2] += err * 7;
            next[x] += err * 3;
            next[x + 1] += err * 5;
            next[x + 2] += err;
        }
        core::mem::swap(&mut cur, &mut next);
        next.fill(0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_matches_601_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn alpha_only_detection() {
        let icon = [RGBA8::new(0, 0, 0, 0), RGBA8::new(0, 0, 0, 200)];
        assert!(is_alpha_only(&icon));

        let opaque_black = [RGBA8::new(0, 0, 0, 255); 2];
        assert!(!is_alpha_only(&opaque_black));

        let colored = [RGBA8::new(0, 0, 0, 0), RGBA8::new(1, 0, 0, 255)];
        assert!(!is_alpha_only(&colored));

        assert!(!is_alpha_only(&[]));
    }

    #[test]
    fn threshold_at_mid_gray() {
        let px = [
            RGBA8::new(127, 127, 127, 255),
            RGBA8::new(128, 128, 128, 255),
        ];
        assert_eq!(to_mono(&px, 2, Dither::None), [false, true]);
    }

    #[test]
    fn threshold_uses_unrounded_luma() {
        // 128*299 + 128*587 + 126*114 = 127772
        assert_eq!(luma(128, 128, 126), 128);
        assert_eq!(bilevel_luma(128, 128, 126), 127);
        let px = [RGBA8::new(128, 128, 126, 255)];
        assert_eq!(to_mono(&px, 1, Dither::None), [false]);
        // 1000 * 128 exactly
        assert_eq!(bilevel_luma(128, 128, 128), 128);
        assert_eq!(bilevel_luma(255, 255, 255), 255);
    }

    #[test]
    fn dithered_mid_gray_pixel_is_off() {
        let px = [RGBA8::new(128, 128, 128, 255)];
        assert_eq!(to_mono(&px, 1, Dither::FloydSteinberg), [false]);
        let px = [RGBA8::new(129, 129, 129, 255)];
        assert_eq!(to_mono(&px, 1, Dither::FloydSteinberg), [true]);
    }

    #[test]
    fn dithered_row_carries_error_right() {
        // 100 off (err 100), 100 + 700/16 = 143 on (err -112),
        // 100 - 784/16 = 51 off (err 51), 100 + 357/16 = 122 off.
        let px = [RGBA8::new(100, 100, 100, 255); 4];
        assert_eq!(
            to_mono(&px, 4, Dither::FloydSteinberg),
            [false, true, false, false]
        );
    }

    #[test]
    fn dithered_error_reaches_next_row() {
        // Row 0: 120 off, err 120 -> 3/16 lost left, 5/16 below, 7/16 right.
        // Row 0, x=1: 0 + 840/16 = 52 off, err 52.
        // Row 1, x=0: 120 + (120*5 + 52*3)/16 = 120 + 756/16 = 167 on.
        let px = [
            RGBA8::new(120, 120, 120, 255),
            RGBA8::new(0, 0, 0, 255),
            RGBA8::new(120, 120, 120, 255),
            RGBA8::new(0, 0, 0, 255),
        ];
        assert_eq!(
            to_mono(&px, 2, Dither::FloydSteinberg),
            [false, false, true, false]
        );
    }

    #[test]
    fn mono_uses_alpha_for_alpha_only() {
        let px = [RGBA8::new(0, 0, 0, 0), RGBA8::new(0, 0, 0, 255)];
        assert_eq!(to_mono(&px, 2, Dither::None), [false, true]);
    }

    #[test]
    fn floyd_steinberg_preserves_extremes() {
        let white = [RGBA8::new(255, 255, 255, 255); 6];
        assert!(to_mono(&white, 3, Dither::FloydSteinberg).iter().all(|&b| b));
        let black = [RGBA8::new(0, 0, 0, 255); 6];
        assert!(to_mono(&black, 3, Dither::FloydSteinberg).iter().all(|&b| !b));
    }

    #[test]
    fn floyd_steinberg_mid_gray_is_half_on() {
        let gray = [RGBA8::new(128, 128, 128, 255); 64];
        let bits = to_mono(&gray, 8, Dither::FloydSteinberg);
        let on = bits.iter().filter(|&&b| b).count();
        assert!((24..=40).contains(&on), "{on} of 64 on");
    }

    #[test]
    fn luma_alpha_keeps_alpha() {
        let px = [RGBA8::new(255, 255, 255, 100)];
        assert_eq!(
            to_luma_alpha(&px),
            [LumaAlpha {
                luma: 255,
                alpha: 100
            }]
        );
        assert_eq!(
            alpha_as_luma(&px),
            [LumaAlpha {
                luma: 100,
                alpha: 255
            }]
        );
    }
}

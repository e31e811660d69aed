//! # zenpack
//!
//! Packs decoded RGBA frames into the fixed byte layouts firmware image
//! decoders read: 1-bit monochrome, 8-bit grayscale, RGB565 and RGB.
//!
//! The output is deterministic and byte-exact. Its size depends only on
//! the format, transparency mode and dimensions, so storage for images
//! loaded at device runtime can be reserved up front with
//! [`buffer_size`] or [`EncodeRequest::placeholder`].
//!
//! ## Formats
//!
//! | Format      | Bytes per pixel              | Transparency            |
//! |-------------|------------------------------|-------------------------|
//! | `Binary`    | 1 bit, rows padded to bytes  | opaque, chroma-key      |
//! | `Grayscale` | 1                            | all three               |
//! | `Rgb565`    | 2, or 3 with alpha channel   | all three               |
//! | `Rgb`       | 3, or 4 with alpha channel   | all three               |
//!
//! Chroma-key reserves a sentinel: luma `1` for grayscale, `(0, 1, 0)` for
//! the RGB family. Opaque pixels that would collide with it are nudged to
//! `0` / `(0, 0, 0)`.
//!
//! Animations are stacked vertically: frame 0's rows first, then frame 1's.
//!
//! ## Non-Goals
//!
//! - Decoding source files (PNG, SVG, ...)
//! - Unpacking back to displayable pixels
//! - Resampling or palette quantization
//!
//! ## Usage
//!
//! ```
//! use zenpack::{EncodeRequest, Transparency, Unstoppable};
//! use rgb::RGBA8;
//!
//! let pixels = [RGBA8::new(255, 0, 0, 255), RGBA8::new(0, 0, 0, 0)];
//!
//! let packed = EncodeRequest::rgb565()
//!     .with_transparency(Transparency::ChromaKey)
//!     .encode_rgba(&pixels, 2, 1, Unstoppable)?;
//!
//! assert_eq!(packed.data(), &[0xF8, 0x00, 0x00, 0x20]);
//! # Ok::<(), zenpack::EncodeError>(())
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod encode;
mod encoder;
mod error;
mod limits;
mod output;
mod pixel;
pub mod policy;
pub mod reduce;
mod size;
mod source;

// Re-exports
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::EncodeError;
pub use limits::Limits;
pub use output::EncodedImage;
pub use pixel::{ByteOrder, Dither, PixelFormat, Transparency};
pub use size::{buffer_size, row_bytes};
pub use source::{Frames, PixelSource};

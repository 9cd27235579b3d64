#![deny(missing_docs)]
//! Pixel buffer type shared by the pixfilter crates

/// 8-bit interleaved pixel buffer.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{ImageSize, PixelBuffer, SUPPORTED_CHANNELS};

#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access and
/// encoding/decoding failures.
pub mod error;

/// Read and write images picking the codec from the file extension.
pub mod functional;

/// JPEG image encoding and decoding.
pub mod jpeg;

/// PNG image encoding and decoding.
///
/// Read and write 8-bit grayscale, RGB and RGBA PNG images.
pub mod png;

pub use crate::error::IoError;

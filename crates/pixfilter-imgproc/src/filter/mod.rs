//! Filter operations
//!
//! This module provides filter operations for image processing. Every
//! spatial filter resolves out-of-range neighbours with [`border::reflect_index`].

/// Boundary handling
pub mod border;

/// Filter kernels
pub mod kernels;

/// Generic 2D convolution
mod convolution;
pub use convolution::*;

/// Rank filters
mod median;
pub use median::*;

/// Blur operations
mod ops;
pub use ops::*;

/// Gradient based edge detection
mod sobel;
pub use sobel::*;

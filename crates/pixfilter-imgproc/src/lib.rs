#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// error types for the filters.
pub mod error;

/// image filtering module.
pub mod filter;

/// operations to threshold images.
pub mod threshold;

pub use crate::error::FilterError;

use pixfilter_image::ImageError;

/// An error type for the image processing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A scalar parameter or the channel count is not valid for the operation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The kernel is too large to be reflected once inside the image.
    #[error("Kernel of size {kernel_size} does not fit an image of {width}x{height} pixels")]
    DimensionMismatch {
        /// Side length of the square kernel.
        kernel_size: usize,
        /// Width of the image.
        width: usize,
        /// Height of the image.
        height: usize,
    },

    /// Error creating the output image.
    #[error(transparent)]
    Image(#[from] ImageError),
}

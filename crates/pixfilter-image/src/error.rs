/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image has no pixels.
    #[error("Image size must be non-zero, got {0}x{1}")]
    ZeroSizedImage(usize, usize),

    /// Error when the number of channels is not one of 1, 3 or 4.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),
}

use pixfilter_image::PixelBuffer;

use super::{border::check_kernel_fits, convolve, kernels};
use crate::error::FilterError;

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The size of the square kernel. Must be odd.
///
/// # Returns
///
/// A new image where every sample is the mean of its neighbourhood.
pub fn box_blur(src: &PixelBuffer, kernel_size: usize) -> Result<PixelBuffer, FilterError> {
    check_kernel_fits(kernel_size, src.size())?;
    let kernel = kernels::box_kernel(kernel_size)?;
    convolve(src, &kernel)
}

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The size of the square kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Must be positive.
pub fn gaussian_blur(
    src: &PixelBuffer,
    kernel_size: usize,
    sigma: f32,
) -> Result<PixelBuffer, FilterError> {
    check_kernel_fits(kernel_size, src.size())?;
    let kernel = kernels::gaussian_kernel(kernel_size, sigma)?;
    convolve(src, &kernel)
}

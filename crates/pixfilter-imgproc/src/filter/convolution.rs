use pixfilter_image::PixelBuffer;

use super::border::{check_kernel_fits, reflect_coord};
use super::kernels::Kernel;
use crate::error::FilterError;

/// Round to the nearest integer (half away from zero for positive values) and
/// saturate to the 8-bit range.
#[inline]
pub(crate) fn saturate_u8(value: f32) -> u8 {
    ((value + 0.5) as i32).clamp(0, 255) as u8
}

/// Weighted sum of the neighbourhood of `(x, y)` in channel `ch`, before
/// rounding.
#[inline]
pub(crate) fn kernel_response(
    src: &PixelBuffer,
    kernel: &Kernel,
    x: usize,
    y: usize,
    ch: usize,
) -> f32 {
    let half = kernel.half() as isize;
    let mut sum = 0.0f32;
    for ky in 0..kernel.size() {
        let sy = reflect_coord(y, ky as isize - half, src.height());
        for kx in 0..kernel.size() {
            let sx = reflect_coord(x, kx as isize - half, src.width());
            sum += kernel.get(kx, ky) * src.get_unchecked(sx, sy, ch) as f32;
        }
    }
    sum
}

/// Convolve an image with a square kernel.
///
/// Every channel is filtered independently. Neighbours outside the image are
/// reflected about the edge, and each result is rounded and clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The kernel to apply.
///
/// # Returns
///
/// A new image with the same shape as `src`.
///
/// # Errors
///
/// Returns [`FilterError::DimensionMismatch`] if the kernel is too large for the
/// image.
///
/// # Examples
///
/// ```
/// use pixfilter_image::PixelBuffer;
/// use pixfilter_imgproc::filter::{convolve, kernels::box_kernel};
///
/// let image = PixelBuffer::from_size_val([5, 5].into(), 3, 42).unwrap();
/// let blurred = convolve(&image, &box_kernel(3).unwrap()).unwrap();
/// assert_eq!(blurred, image);
/// ```
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> Result<PixelBuffer, FilterError> {
    check_kernel_fits(kernel.size(), src.size())?;

    let dst = PixelBuffer::from_fn(src.size(), src.num_channels(), |x, y, ch| {
        saturate_u8(kernel_response(src, kernel, x, y, ch))
    })?;

    Ok(dst)
}

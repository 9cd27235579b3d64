use pixfilter_image::PixelBuffer;

use super::border::{check_kernel_fits, reflect_coord};
use super::kernels::check_odd_size;
use crate::error::FilterError;

/// Blur an image with a median filter.
///
/// Each output sample is the median of the `kernel_size x kernel_size`
/// neighbourhood of the same channel. Neighbours outside the image are
/// reflected about the edge.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The side of the window. Must be odd and at least 3.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] for an invalid `kernel_size` and
/// [`FilterError::DimensionMismatch`] if the window is too large for the image.
///
/// # Examples
///
/// ```
/// use pixfilter_image::PixelBuffer;
/// use pixfilter_imgproc::filter::median_blur;
///
/// let mut data = vec![0u8; 25];
/// data[12] = 255;
/// let image = PixelBuffer::new([5, 5].into(), 1, data).unwrap();
///
/// let filtered = median_blur(&image, 3).unwrap();
/// assert_eq!(filtered.get(2, 2, 0), Some(0));
/// ```
pub fn median_blur(src: &PixelBuffer, kernel_size: usize) -> Result<PixelBuffer, FilterError> {
    check_odd_size(kernel_size, 3, "median kernel")?;
    check_kernel_fits(kernel_size, src.size())?;

    let half = (kernel_size / 2) as isize;
    let mut window = Vec::with_capacity(kernel_size * kernel_size);

    let dst = PixelBuffer::from_fn(src.size(), src.num_channels(), |x, y, ch| {
        window.clear();
        for dy in -half..=half {
            let sy = reflect_coord(y, dy, src.height());
            for dx in -half..=half {
                let sx = reflect_coord(x, dx, src.width());
                window.push(src.get_unchecked(sx, sy, ch));
            }
        }
        window.sort_unstable();
        window[window.len() / 2]
    })?;

    Ok(dst)
}

use pixfilter_image::ImageSize;

use crate::error::FilterError;

/// Reflect a coordinate into the inclusive range `[low, high]`.
///
/// The edge sample is repeated: one step past `high` maps to `high`, two steps
/// past maps to `high - 1`, and symmetrically below `low`.
///
/// Example: ...d c b a | a b c d...
///
/// Only a single reflection is performed. Callers keep the overshoot within the
/// extent of the range with [`check_kernel_fits`].
///
/// # Examples
///
/// ```
/// use pixfilter_imgproc::filter::border::reflect_index;
///
/// assert_eq!(reflect_index(-1, 0, 4), 0);
/// assert_eq!(reflect_index(-2, 0, 4), 1);
/// assert_eq!(reflect_index(5, 0, 4), 4);
/// assert_eq!(reflect_index(6, 0, 4), 3);
/// assert_eq!(reflect_index(2, 0, 4), 2);
/// ```
#[inline]
pub fn reflect_index(v: isize, low: isize, high: isize) -> isize {
    if v < low {
        low + (low - v - 1)
    } else if v > high {
        high - (v - high - 1)
    } else {
        v
    }
}

/// Resolve `base + offset` inside `[0, len)` with [`reflect_index`].
#[inline]
pub(crate) fn reflect_coord(base: usize, offset: isize, len: usize) -> usize {
    reflect_index(base as isize + offset, 0, len as isize - 1) as usize
}

/// Verify that a square kernel of side `kernel_size` can be applied to an image
/// of `size` with a single reflection per axis.
///
/// A kernel larger than `2 * min(width, height) - 1` would need to reflect past
/// the opposite edge.
///
/// # Errors
///
/// Returns [`FilterError::DimensionMismatch`] when the kernel does not fit.
pub fn check_kernel_fits(kernel_size: usize, size: ImageSize) -> Result<(), FilterError> {
    let extent = size.width.min(size.height);
    if extent == 0 || kernel_size > 2 * extent - 1 {
        return Err(FilterError::DimensionMismatch {
            kernel_size,
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

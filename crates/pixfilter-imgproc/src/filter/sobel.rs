use pixfilter_image::PixelBuffer;

use super::border::check_kernel_fits;
use super::convolution::{convolve, kernel_response};
use super::kernels;
use crate::{color::gray_from_rgb, error::FilterError};

/// How the two gradient passes are combined into the edge magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GradientMode {
    /// Round and clamp each gradient to `[0, 255]` before taking the magnitude.
    ///
    /// Negative gradients are lost, so only dark-to-bright transitions along +x
    /// and +y respond.
    #[default]
    Clamped,
    /// Combine the raw gradients and round only the final magnitude.
    Unclamped,
}

/// Options for [`sobel_edges_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOptions {
    /// How the gradient passes are combined.
    pub gradient_mode: GradientMode,
}

#[inline]
fn magnitude(gx: f32, gy: f32) -> u8 {
    let m = ((gx * gx + gy * gy).sqrt() + 0.5) as i32;
    m.min(255) as u8
}

/// Detect edges with the sobel operator.
///
/// Equivalent to [`sobel_edges_with_options`] with [`GradientMode::Clamped`].
///
/// # Arguments
///
/// * `src` - The source image with at least 3 channels.
///
/// # Returns
///
/// A single channel image with the gradient magnitude.
pub fn sobel_edges(src: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
    sobel_edges_with_options(src, &EdgeOptions::default())
}

/// Detect edges with the sobel operator.
///
/// The image is converted to grayscale with [`gray_from_rgb`], convolved with
/// the horizontal and vertical sobel kernels, and each output sample is
/// `min(255, round(sqrt(gx² + gy²)))`.
///
/// # Arguments
///
/// * `src` - The source image with at least 3 channels.
/// * `options` - How the gradients are combined.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `src` has fewer than 3 channels
/// and [`FilterError::DimensionMismatch`] if the image is smaller than 2x2.
pub fn sobel_edges_with_options(
    src: &PixelBuffer,
    options: &EdgeOptions,
) -> Result<PixelBuffer, FilterError> {
    if src.num_channels() < 3 {
        return Err(FilterError::InvalidParameter(format!(
            "edge detection needs at least 3 channels, got {}",
            src.num_channels()
        )));
    }

    let (kernel_x, kernel_y) = kernels::sobel_kernels();
    check_kernel_fits(kernel_x.size(), src.size())?;

    let gray = gray_from_rgb(src)?;

    let dst = match options.gradient_mode {
        GradientMode::Clamped => {
            let gx = convolve(&gray, &kernel_x)?;
            let gy = convolve(&gray, &kernel_y)?;
            let data = gx
                .as_slice()
                .iter()
                .zip(gy.as_slice())
                .map(|(&gx, &gy)| magnitude(gx as f32, gy as f32))
                .collect();
            PixelBuffer::new(gray.size(), 1, data)?
        }
        GradientMode::Unclamped => PixelBuffer::from_fn(gray.size(), 1, |x, y, _| {
            magnitude(
                kernel_response(&gray, &kernel_x, x, y, 0),
                kernel_response(&gray, &kernel_y, x, y, 0),
            )
        })?,
    };

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_image::ImageSize;

    fn rgb_from_columns(columns: &[u8], height: usize) -> Result<PixelBuffer, FilterError> {
        let size = ImageSize {
            width: columns.len(),
            height,
        };
        Ok(PixelBuffer::from_fn(size, 3, |x, _, _| columns[x])?)
    }

    #[test]
    fn test_sobel_uniform_is_zero() -> Result<(), FilterError> {
        for channels in [3, 4] {
            let image = PixelBuffer::from_size_val([6, 5].into(), channels, 173)?;
            for gradient_mode in [GradientMode::Clamped, GradientMode::Unclamped] {
                let edges = sobel_edges_with_options(&image, &EdgeOptions { gradient_mode })?;
                assert_eq!(edges.num_channels(), 1);
                assert_eq!(edges.size(), image.size());
                assert!(edges.as_slice().iter().all(|&v| v == 0));
            }
        }
        Ok(())
    }

    #[test]
    fn test_sobel_vertical_step() -> Result<(), FilterError> {
        // gx = 4 * (v(x + 1) - v(x - 1)), gy = 0
        let image = rgb_from_columns(&[0, 0, 10, 10], 4)?;
        let edges = sobel_edges(&image)?;

        for y in 0..4 {
            let row: Vec<u8> = (0..4).filter_map(|x| edges.get(x, y, 0)).collect();
            assert_eq!(row, vec![0, 40, 40, 0]);
        }
        Ok(())
    }

    #[test]
    fn test_sobel_diagonal_ramp() -> Result<(), FilterError> {
        let image = PixelBuffer::from_fn([4, 4].into(), 3, |x, y, _| (10 * (x + y)) as u8)?;
        let edges = sobel_edges(&image)?;

        // gx = gy = 80 away from the border, sqrt(2 * 80²) = 113.137
        assert_eq!(edges.get(1, 1, 0), Some(113));
        assert_eq!(edges.get(2, 2, 0), Some(113));
        Ok(())
    }

    #[test]
    fn test_sobel_clamped_drops_negative_gradients() -> Result<(), FilterError> {
        // bright to dark along +x gives gx = -400
        let image = rgb_from_columns(&[100, 100, 0, 0], 4)?;

        let clamped = sobel_edges(&image)?;
        assert!(clamped.as_slice().iter().all(|&v| v == 0));

        let unclamped = sobel_edges_with_options(
            &image,
            &EdgeOptions {
                gradient_mode: GradientMode::Unclamped,
            },
        )?;
        for y in 0..4 {
            assert_eq!(unclamped.get(0, y, 0), Some(0));
            assert_eq!(unclamped.get(1, y, 0), Some(255));
            assert_eq!(unclamped.get(2, y, 0), Some(255));
            assert_eq!(unclamped.get(3, y, 0), Some(0));
        }
        Ok(())
    }

    #[test]
    fn test_sobel_invalid_input() -> Result<(), FilterError> {
        let gray = PixelBuffer::from_size_val([4, 4].into(), 1, 0)?;
        assert!(matches!(
            sobel_edges(&gray),
            Err(FilterError::InvalidParameter(_))
        ));

        let single_row = PixelBuffer::from_size_val([4, 1].into(), 3, 0)?;
        assert!(matches!(
            sobel_edges(&single_row),
            Err(FilterError::DimensionMismatch { .. })
        ));
        Ok(())
    }
}

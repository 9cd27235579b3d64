use pixfilter_image::PixelBuffer;

use crate::error::FilterError;

/// Apply a binary threshold to a grayscale image.
///
/// # Arguments
///
/// * `src` - The input image with a single channel.
/// * `threshold` - The threshold value, in `[0, 255]`.
///
/// # Returns
///
/// A single channel image where samples greater than or equal to `threshold`
/// become 255 and all others become 0.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `src` does not have exactly one
/// channel or `threshold` is outside `[0, 255]`.
///
/// # Examples
///
/// ```
/// use pixfilter_image::{ImageSize, PixelBuffer};
/// use pixfilter_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = PixelBuffer::new(ImageSize { width: 2, height: 3 }, 1, data).unwrap();
///
/// let thresholded = threshold_binary(&image, 150).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary(src: &PixelBuffer, threshold: i32) -> Result<PixelBuffer, FilterError> {
    if src.num_channels() != 1 {
        return Err(FilterError::InvalidParameter(format!(
            "threshold needs a single channel image, got {} channels",
            src.num_channels()
        )));
    }

    let threshold = u8::try_from(threshold).map_err(|_| {
        FilterError::InvalidParameter(format!(
            "threshold must be in [0, 255], got {threshold}"
        ))
    })?;

    let data = src
        .as_slice()
        .iter()
        .map(|&v| if v >= threshold { 255 } else { 0 })
        .collect();

    Ok(PixelBuffer::new(src.size(), 1, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::gray_from_rgb;

    #[test]
    fn threshold_binary_values() -> Result<(), FilterError> {
        let image = PixelBuffer::new([5, 1].into(), 1, vec![0, 127, 128, 129, 255])?;

        let dst = threshold_binary(&image, 128)?;
        assert_eq!(dst.as_slice(), &[0, 0, 255, 255, 255]);

        let dst = threshold_binary(&image, 0)?;
        assert!(dst.as_slice().iter().all(|&v| v == 255));
        Ok(())
    }

    #[test]
    fn threshold_binary_idempotent() -> Result<(), FilterError> {
        let image = PixelBuffer::from_fn([4, 3].into(), 1, |x, y, _| {
            if (x + y) % 2 == 0 {
                255
            } else {
                0
            }
        })?;

        for t in 1..=255 {
            assert_eq!(threshold_binary(&image, t)?, image);
        }
        Ok(())
    }

    #[test]
    fn threshold_after_grayscale() -> Result<(), FilterError> {
        let image = PixelBuffer::from_size_val([4, 4].into(), 3, 200)?;

        let gray = gray_from_rgb(&image)?;
        assert!(gray.as_slice().iter().all(|&v| v == 200));

        let binary = threshold_binary(&gray, 128)?;
        assert_eq!(binary.num_channels(), 1);
        assert_eq!(binary.size(), image.size());
        assert!(binary.as_slice().iter().all(|&v| v == 255));
        Ok(())
    }

    #[test]
    fn threshold_binary_invalid() -> Result<(), FilterError> {
        let gray = PixelBuffer::from_size_val([2, 2].into(), 1, 0)?;
        assert!(matches!(
            threshold_binary(&gray, -1),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            threshold_binary(&gray, 256),
            Err(FilterError::InvalidParameter(_))
        ));

        let rgb = PixelBuffer::from_size_val([2, 2].into(), 3, 0)?;
        assert!(matches!(
            threshold_binary(&rgb, 128),
            Err(FilterError::InvalidParameter(_))
        ));
        Ok(())
    }
}

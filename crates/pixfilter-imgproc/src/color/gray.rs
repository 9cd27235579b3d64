use pixfilter_image::PixelBuffer;

use crate::error::FilterError;

/// Define the RGB weights for the grayscale conversion.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (RW * r as f32 + GW * g as f32 + BW * b as f32 + 0.5) as u8
}

/// Convert an RGB or RGBA image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The alpha channel, if any, is ignored.
///
/// # Arguments
///
/// * `src` - The input image with at least 3 channels.
///
/// # Returns
///
/// A single channel image with the same size as `src`.
///
/// # Example
///
/// ```
/// use pixfilter_image::{ImageSize, PixelBuffer};
/// use pixfilter_imgproc::color::gray_from_rgb;
///
/// let image = PixelBuffer::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     3,
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let gray = gray_from_rgb(&image).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_rgb(src: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
    if src.num_channels() < 3 {
        return Err(FilterError::InvalidParameter(format!(
            "grayscale conversion needs at least 3 channels, got {}",
            src.num_channels()
        )));
    }

    let data = src.pixels().map(|px| luma(px[0], px[1], px[2])).collect();

    Ok(PixelBuffer::new(src.size(), 1, data)?)
}

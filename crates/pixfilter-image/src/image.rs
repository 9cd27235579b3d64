use crate::error::ImageError;

/// Channel counts a [`PixelBuffer`] may carry: gray, RGB and RGBA.
pub const SUPPORTED_CHANNELS: [usize; 3] = [1, 3, 4];

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixfilter_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// The number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// An 8-bit image with interleaved channels.
///
/// The sample of channel `c` at column `x` and row `y` is stored at
/// `(y * width + x) * channels + c`. Rows are packed with no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: ImageSize,
    channels: usize,
    data: Vec<u8>,
}

fn validate_layout(size: ImageSize, channels: usize) -> Result<(), ImageError> {
    if size.width == 0 || size.height == 0 {
        return Err(ImageError::ZeroSizedImage(size.width, size.height));
    }
    if !SUPPORTED_CHANNELS.contains(&channels) {
        return Err(ImageError::UnsupportedChannels(channels));
    }
    Ok(())
}

impl PixelBuffer {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of interleaved channels (1, 3 or 4).
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the size is empty, the channel count is unsupported or the length of
    /// the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfilter_image::{ImageSize, PixelBuffer};
    ///
    /// let image = PixelBuffer::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        validate_layout(size, channels)?;

        // check if the data length matches the image size
        let expected = size.area() * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new image with every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfilter_image::PixelBuffer;
    ///
    /// let image = PixelBuffer::from_size_val([4, 2].into(), 1, 7).unwrap();
    /// assert!(image.as_slice().iter().all(|&v| v == 7));
    /// ```
    pub fn from_size_val(size: ImageSize, channels: usize, val: u8) -> Result<Self, ImageError> {
        validate_layout(size, channels)?;
        Self::new(size, channels, vec![val; size.area() * channels])
    }

    /// Create a new image by evaluating `f(x, y, channel)` for every sample.
    ///
    /// Samples are produced in storage order: rows top to bottom, pixels left
    /// to right, channels in order. The layout is validated before `f` is
    /// called for the first time.
    pub fn from_fn<F>(size: ImageSize, channels: usize, mut f: F) -> Result<Self, ImageError>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        validate_layout(size, channels)?;

        let mut data = Vec::with_capacity(size.area() * channels);
        for y in 0..size.height {
            for x in 0..size.width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }

        Self::new(size, channels, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// The raw interleaved samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: usize, y: usize, ch: usize) -> Option<usize> {
        if x >= self.width() || y >= self.height() || ch >= self.channels {
            return None;
        }
        Some((y * self.width() + x) * self.channels + ch)
    }

    /// Get a single sample, or `None` if any coordinate is out of bounds.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<u8> {
        self.offset(x, y, ch).map(|idx| self.data[idx])
    }

    /// Get a single sample.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of bounds. Use [`PixelBuffer::get`] when
    /// the coordinates are not already known to be valid.
    #[inline]
    pub fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> u8 {
        debug_assert!(x < self.width() && y < self.height() && ch < self.channels);
        self.data[(y * self.width() + x) * self.channels + ch]
    }

    /// All channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        let start = self.offset(x, y, 0)?;
        Some(&self.data[start..start + self.channels])
    }

    /// Iterate over pixels in storage order, each as a slice of its channels.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{ImageError, ImageSize, PixelBuffer};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_rejects_bad_layout() {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        assert_eq!(
            PixelBuffer::new(size, 3, vec![0; 11]),
            Err(ImageError::InvalidChannelShape(11, 12))
        );
        assert_eq!(
            PixelBuffer::new(size, 2, vec![0; 8]),
            Err(ImageError::UnsupportedChannels(2))
        );
        assert_eq!(
            PixelBuffer::from_size_val([0, 3].into(), 1, 0),
            Err(ImageError::ZeroSizedImage(0, 3))
        );
    }

    #[test]
    fn image_row_major_layout() -> Result<(), ImageError> {
        // 3x2 rgb image, sample value encodes its own flat index
        let image = PixelBuffer::new([3, 2].into(), 3, (0..18).collect())?;

        assert_eq!(image.get(0, 0, 0), Some(0));
        assert_eq!(image.get(1, 0, 2), Some(5));
        assert_eq!(image.get(0, 1, 0), Some(9));
        assert_eq!(image.get(2, 1, 1), Some(16));
        assert_eq!(image.pixel(2, 1), Some(&[15u8, 16, 17][..]));
        assert_eq!(image.get(3, 0, 0), None);
        assert_eq!(image.get(0, 0, 3), None);

        Ok(())
    }

    #[test]
    fn image_from_fn() -> Result<(), ImageError> {
        let image = PixelBuffer::from_fn([2, 2].into(), 4, |x, y, c| (x + 2 * y + 10 * c) as u8)?;
        assert_eq!(image.pixel(1, 1), Some(&[3u8, 13, 23, 33][..]));
        assert_eq!(image.as_slice().len(), 16);
        Ok(())
    }
}

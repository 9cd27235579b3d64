use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use jpeg_encoder::{ColorType, Encoder};
use pixfilter_image::{ImageSize, PixelBuffer};

use crate::error::IoError;

/// Read a JPEG image as an 8-bit pixel buffer.
///
/// Grayscale streams decode to a single channel, every other color space is
/// converted to rgb.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG file.
///
/// # Errors
///
/// Fails if the file does not exist, does not have a `jpg` or `jpeg`
/// extension, or cannot be decoded.
pub fn read_image_jpeg(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("jpg") && !ext.eq_ignore_ascii_case("jpeg")
    }) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let jpeg_data = std::fs::read(file_path)?;
    decode_jpeg_impl(&jpeg_data)
}

/// Decode a JPEG image from raw bytes.
///
/// # Arguments
///
/// - `bytes` - Raw bytes of the jpeg file
pub fn decode_image_jpeg(bytes: &[u8]) -> Result<PixelBuffer, IoError> {
    decode_jpeg_impl(bytes)
}

fn decode_jpeg_impl(bytes: &[u8]) -> Result<PixelBuffer, IoError> {
    let mut decoder = zune_jpeg::JpegDecoder::new(bytes);
    decoder.decode_headers()?;

    let image_info = decoder.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;

    let image_size = ImageSize {
        width: image_info.width as usize,
        height: image_info.height as usize,
    };
    if image_size.area() == 0 {
        return Err(IoError::DecodeError(format!(
            "empty jpeg image {image_size}"
        )));
    }

    let img_data = decoder.decode()?;

    // the decoder picks the output color space, recover it from the sample count
    let channels = img_data.len() / image_size.area();

    Ok(PixelBuffer::new(image_size, channels, img_data)?)
}

/// Writes the given image as a JPEG to the given file path.
///
/// Single channel images are written as grayscale, 3 channels as rgb and 4
/// channels as rgba with the alpha channel dropped by the encoder.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image to write.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg(
    file_path: impl AsRef<Path>,
    image: &PixelBuffer,
    quality: u8,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    write_jpeg_impl(&mut writer, image, quality)?;
    writer.flush()?;
    Ok(())
}

/// Encodes the given image as a JPEG in memory.
///
/// # Arguments
///
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn encode_image_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    write_jpeg_impl(&mut bytes, image, quality)?;
    Ok(bytes)
}

fn write_jpeg_impl<W: Write>(sink: W, image: &PixelBuffer, quality: u8) -> Result<(), IoError> {
    let color_type = match image.num_channels() {
        1 => ColorType::Luma,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::EncodeError(format!(
                "cannot encode an image with {n} channels"
            )))
        }
    };

    let (Ok(width), Ok(height)) = (u16::try_from(image.width()), u16::try_from(image.height()))
    else {
        return Err(IoError::EncodeError(format!(
            "{} is too large for jpeg",
            image.size()
        )));
    };

    let encoder = Encoder::new(sink, quality);
    encoder.encode(image.as_slice(), width, height, color_type)?;
    Ok(())
}

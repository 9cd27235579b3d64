use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use pixfilter_image::{ImageSize, PixelBuffer};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::error::IoError;

/// Read a PNG image as an 8-bit pixel buffer.
///
/// Palette and low bit depth images are expanded and 16-bit samples are
/// reduced to their most significant byte, so the result always has 8-bit
/// samples with 1 (gray), 3 (rgb) or 4 (rgba) channels.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Errors
///
/// Fails if the file does not exist, does not have a `png` extension, cannot
/// be decoded, or decodes to gray+alpha.
pub fn read_image_png(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    match file_path.extension() {
        Some(extension) if extension.eq_ignore_ascii_case("png") => {}
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    let file = File::open(file_path)?;
    decode_png_impl(BufReader::new(file))
}

/// Decode a PNG image from raw bytes.
///
/// See [`read_image_png`] for the supported layouts.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the png file
pub fn decode_image_png(bytes: &[u8]) -> Result<PixelBuffer, IoError> {
    decode_png_impl(bytes)
}

fn channels_from_color_type(color_type: ColorType) -> Result<usize, IoError> {
    match color_type {
        ColorType::Grayscale => Ok(1),
        ColorType::Rgb => Ok(3),
        ColorType::Rgba => Ok(4),
        other => Err(IoError::DecodeError(format!(
            "unsupported color type {other:?}, expected gray, rgb or rgba"
        ))),
    }
}

// utility function to decode png data from any reader
fn decode_png_impl<R: Read>(source: R) -> Result<PixelBuffer, IoError> {
    let mut decoder = Decoder::new(source);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(IoError::DecodeError(format!(
            "unsupported bit depth {:?}",
            info.bit_depth
        )));
    }
    let channels = channels_from_color_type(info.color_type)?;

    // the output buffer may be larger than a single frame
    buf.truncate(info.buffer_size());

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok(PixelBuffer::new(size, channels, buf)?)
}

/// Writes the given image as an 8-bit PNG to the given file path.
///
/// The color type follows the channel count: 1 is written as grayscale, 3 as
/// rgb and 4 as rgba.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image to write.
pub fn write_image_png(file_path: impl AsRef<Path>, image: &PixelBuffer) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    write_png_impl(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Encodes the given image as an 8-bit PNG in memory.
///
/// # Arguments
///
/// - `image` - The image to encode.
pub fn encode_image_png(image: &PixelBuffer) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    write_png_impl(&mut bytes, image)?;
    Ok(bytes)
}

fn write_png_impl<W: Write>(sink: W, image: &PixelBuffer) -> Result<(), IoError> {
    let color_type = match image.num_channels() {
        1 => ColorType::Grayscale,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::EncodeError(format!(
                "cannot encode an image with {n} channels"
            )))
        }
    };

    let mut encoder = Encoder::new(sink, image.width() as u32, image.height() as u32);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(image.as_slice())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;

    fn encode_raw(
        width: u32,
        height: u32,
        color_type: ColorType,
        depth: BitDepth,
        palette: Option<Vec<u8>>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(depth);
            if let Some(palette) = palette {
                encoder.set_palette(palette);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        bytes
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        for channels in [1, 3, 4] {
            let file_path = tmp_dir.path().join(format!("image-{channels}.png"));
            let image = PixelBuffer::from_fn([5, 3].into(), channels, |x, y, c| {
                (x * 50 + y * 7 + c) as u8
            })?;

            write_image_png(&file_path, &image)?;
            assert!(file_path.exists(), "File does not exist: {:?}", file_path);

            let image_back = read_image_png(&file_path)?;
            assert_eq!(image_back.cols(), 5);
            assert_eq!(image_back.rows(), 3);
            assert_eq!(image_back.num_channels(), channels);
            assert_eq!(image_back, image);
        }

        Ok(())
    }

    #[test]
    fn decode_palette_png() -> Result<(), IoError> {
        let bytes = encode_raw(
            2,
            1,
            ColorType::Indexed,
            BitDepth::Eight,
            Some(vec![255, 0, 0, 0, 0, 255]),
            &[0, 1],
        );

        let image = decode_image_png(&bytes)?;
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.as_slice(), &[255, 0, 0, 0, 0, 255]);
        Ok(())
    }

    #[test]
    fn decode_rgb16_png() -> Result<(), IoError> {
        let bytes = encode_raw(
            1,
            1,
            ColorType::Rgb,
            BitDepth::Sixteen,
            None,
            &[0x12, 0x34, 0xab, 0xcd, 0xff, 0x00],
        );

        let image = decode_image_png(&bytes)?;
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.as_slice(), &[0x12, 0xab, 0xff]);
        Ok(())
    }

    #[test]
    fn decode_gray_alpha_png_fails() {
        let bytes = encode_raw(
            1,
            1,
            ColorType::GrayscaleAlpha,
            BitDepth::Eight,
            None,
            &[10, 20],
        );
        assert!(matches!(
            decode_image_png(&bytes),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(matches!(
            decode_image_png(b"definitely not a png"),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn encode_in_memory() -> Result<(), IoError> {
        let image = PixelBuffer::from_size_val([3, 2].into(), 1, 77)?;
        let bytes = encode_image_png(&image)?;
        assert_eq!(decode_image_png(&bytes)?, image);
        Ok(())
    }

    #[test]
    fn read_invalid_paths() -> Result<(), IoError> {
        assert!(matches!(
            read_image_png("does/not/exist.png"),
            Err(IoError::FileDoesNotExist(_))
        ));

        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.jpg");
        std::fs::write(&file_path, b"")?;
        assert!(matches!(
            read_image_png(&file_path),
            Err(IoError::InvalidFileExtension(_))
        ));
        Ok(())
    }
}

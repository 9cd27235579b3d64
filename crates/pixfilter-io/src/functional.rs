use std::path::Path;

use pixfilter_image::PixelBuffer;

use crate::{
    error::IoError,
    jpeg::{read_image_jpeg, write_image_jpeg},
    png::{read_image_png, write_image_png},
};

/// Quality used by [`write_image_any`] for JPEG outputs.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ImageFormat {
    Png,
    Jpeg,
}

fn format_from_path(file_path: &Path) -> Result<ImageFormat, IoError> {
    match file_path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(ImageFormat::Png),
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            Ok(ImageFormat::Jpeg)
        }
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

/// Reads an image from the given file path.
///
/// The codec is picked from the extension: `png`, `jpg` or `jpeg`, in any
/// case.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    match format_from_path(file_path)? {
        ImageFormat::Png => read_image_png(file_path),
        ImageFormat::Jpeg => read_image_jpeg(file_path),
    }
}

/// Writes an image to the given file path.
///
/// The codec is picked from the extension like in [`read_image_any`]; JPEG
/// files are written with [`DEFAULT_JPEG_QUALITY`].
pub fn write_image_any(file_path: impl AsRef<Path>, image: &PixelBuffer) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    match format_from_path(file_path)? {
        ImageFormat::Png => write_image_png(file_path, image),
        ImageFormat::Jpeg => write_image_jpeg(file_path, image, DEFAULT_JPEG_QUALITY),
    }
}

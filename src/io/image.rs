//! Image decoding, saving and in-memory JPEG encoding

use crate::io::error::{LabError, Result, fs_error, invalid_parameter};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, ImageReader};
use std::path::Path;

/// Decode an image, guessing the format from its content
///
/// # Errors
///
/// Returns `ImageLoad` (carrying the file size when readable) if the file
/// cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decoded = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(image::ImageError::IoError)
        .and_then(ImageReader::decode);

    match decoded {
        Ok(image) => {
            log::info!("Image info: {}x{} pixels", image.width(), image.height());
            Ok(image)
        }
        Err(source) => Err(LabError::ImageLoad {
            path: path.to_path_buf(),
            size: std::fs::metadata(path).ok().map(|m| m.len()),
            source,
        }),
    }
}

/// Save an image, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| fs_error(parent, "create directory", e))?;
    }

    image.save(path).map_err(|e| LabError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode a grayscale image as JPEG at the given quality
///
/// # Errors
///
/// Returns an error if the quality is outside `1..=100` or encoding fails
pub fn encode_jpeg(image: &GrayImage, quality: u8) -> Result<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(invalid_parameter(
            "quality",
            &quality,
            &"JPEG quality must be between 1 and 100",
        ));
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder.encode_image(image)?;
    }
    Ok(bytes)
}

/// Size of a file in bytes
///
/// # Errors
///
/// Returns a file system error if the metadata cannot be read
pub fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| fs_error(path, "read metadata", e))
}

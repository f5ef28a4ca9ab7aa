//! JPEG re-encoding and compression ratio reporting

use crate::io::configuration::COMPRESSED_FILE_NAME;
use crate::io::error::{LabError, Result, computation_error, fs_error};
use crate::io::figure::{Figure, Panel};
use crate::io::image::{encode_jpeg, file_size};
use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::path::{Path, PathBuf};

/// Sizes before and after re-encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionReport {
    /// Size of the source file in bytes
    pub original_size: u64,
    /// Size of the re-encoded JPEG in bytes
    pub compressed_size: u64,
}

impl CompressionReport {
    /// `original_size / compressed_size`
    pub fn ratio(&self) -> f64 {
        self.original_size as f64 / self.compressed_size as f64
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size of Original Image: {} bytes", self.original_size)?;
        writeln!(f, "Size of Compressed Image: {} bytes", self.compressed_size)?;
        write!(f, "Compression Ratio: {:.2}", self.ratio())
    }
}

/// Outcome of the compression demonstration
#[derive(Debug, Clone)]
pub struct Compression {
    /// Original and decoded JPEG side by side
    pub figure: Figure,
    /// Byte counts of both files
    pub report: CompressionReport,
    /// Where the JPEG was written
    pub compressed_path: PathBuf,
}

/// Re-encode the grayscale image as JPEG and compare file sizes
///
/// The JPEG is written to `output_dir` and decoded again for display so the
/// figure shows the actual compression artefacts.
///
/// # Errors
///
/// Returns an error if encoding, writing or decoding the JPEG fails, or the
/// encoder produced no bytes
pub fn compress(
    image: &DynamicImage,
    source: &Path,
    output_dir: &Path,
    quality: u8,
) -> Result<Compression> {
    let gray = image.to_luma8();
    let bytes = encode_jpeg(&gray, quality)?;
    if bytes.is_empty() {
        return Err(computation_error("compress", &"encoder produced no data"));
    }

    std::fs::create_dir_all(output_dir)
        .map_err(|e| fs_error(output_dir, "create directory", e))?;
    let compressed_path = output_dir.join(COMPRESSED_FILE_NAME);
    std::fs::write(&compressed_path, &bytes)
        .map_err(|e| fs_error(&compressed_path, "write compressed image", e))?;

    let report = CompressionReport {
        original_size: file_size(source)?,
        compressed_size: file_size(&compressed_path)?,
    };

    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg)
        .map_err(|e| LabError::ImageLoad {
            path: compressed_path.clone(),
            size: Some(report.compressed_size),
            source: e,
        })?
        .to_luma8();

    let figure = Figure::new("Compression")
        .with_panel(Panel::gray("Original Image", &gray))
        .with_panel(Panel::gray(
            format!("Compressed Image (quality {quality})"),
            &decoded,
        ));

    Ok(Compression {
        figure,
        report,
        compressed_path,
    })
}

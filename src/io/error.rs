//! Error types and user-facing diagnostics for sample lookup and image operations

use crate::io::configuration::{ACCEPTED_EXTENSIONS, SAMPLE_PREFIX};
use std::fmt;
use std::path::PathBuf;

/// A file that carries the sample prefix but an extension outside the accepted set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearMiss {
    /// File name as listed in the directory
    pub name: String,
    /// Final `.suffix` of the name, or `no extension`
    pub extension: String,
}

/// Main error type for all samplelab operations
#[derive(Debug)]
pub enum LabError {
    /// No file starting with the sample prefix exists
    SampleNotFound {
        /// Every file found in the searched directory, in listing order
        files: Vec<String>,
    },

    /// Files with the sample prefix exist but none has an accepted extension
    UnsupportedFormat {
        /// Each prefix-matching file with its extension
        near_misses: Vec<NearMiss>,
    },

    /// Failed to decode the selected image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Size of the file on disk, when it could be read
        size: Option<u64>,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or save an image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Operation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for LabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SampleNotFound { .. } => {
                write!(
                    f,
                    "No '{SAMPLE_PREFIX}' image found. Make sure you supplied an image file."
                )
            }
            Self::UnsupportedFormat { .. } => {
                write!(f, "Sample image format not supported")
            }
            Self::ImageLoad { path, source, .. } => {
                write!(
                    f,
                    "Failed to read '{}'. It might be corrupted or unsupported: {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for LabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl LabError {
    /// Multi-line troubleshooting text shown to the user
    ///
    /// Locator and decode failures get the full listing and remediation
    /// hints; every other kind falls back to its `Display` form.
    pub fn diagnostic(&self) -> String {
        Diagnostic(self).to_string()
    }
}

struct Diagnostic<'a>(&'a LabError);

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let supported = supported_extensions_label();

        match self.0 {
            LabError::SampleNotFound { files } => {
                let available = if files.is_empty() {
                    "None".to_string()
                } else {
                    files.join(", ")
                };
                write!(
                    f,
                    "NO SAMPLE IMAGE FOUND:\n\
                     No files starting with '{SAMPLE_PREFIX}' were found.\n\n\
                     Available files: {available}\n\n\
                     Expected format: {SAMPLE_PREFIX}.[extension]\n\
                     Supported extensions: {supported}\n\n\
                     Make sure to supply an image file named {SAMPLE_PREFIX}.[extension]"
                )
            }
            LabError::UnsupportedFormat { near_misses } => {
                writeln!(f, "INCOMPATIBLE FORMAT ERROR:")?;
                writeln!(f, "Found sample files with unsupported formats:")?;
                for miss in near_misses {
                    writeln!(f, "  - {} ({})", miss.name, miss.extension)?;
                }
                write!(
                    f,
                    "\nSupported formats: {supported}\n\n\
                     SOLUTIONS:\n\
                     1. Convert your image to a supported format\n\
                     2. Extend the accepted extension set to handle your format\n\
                     3. Use an external image converter for quick conversion"
                )
            }
            LabError::ImageLoad { path, size, .. } => {
                let size = size.map_or_else(|| "unknown".to_string(), |s| format!("{s} bytes"));
                write!(
                    f,
                    "IMAGE READING ERROR:\n\
                     Failed to read {}\n\
                     File size: {size}\n\n\
                     Possible causes:\n\
                     - File is corrupted\n\
                     - Unsupported image format variant\n\
                     - File is not a valid image\n\n\
                     Try supplying the image again or use a different file",
                    path.display()
                )
            }
            other => write!(f, "{other}"),
        }
    }
}

/// Accepted extensions upper-cased and comma separated, e.g. `.JPG, .JPEG`
pub fn supported_extensions_label() -> String {
    ACCEPTED_EXTENSIONS.join(", ").to_uppercase()
}

/// Convenience type alias for samplelab results
pub type Result<T> = std::result::Result<T, LabError>;

impl From<image::ImageError> for LabError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<memory>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LabError {
    LabError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> LabError {
    LabError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn fs_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> LabError {
    LabError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

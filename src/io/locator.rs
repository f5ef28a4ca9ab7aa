//! Sample image discovery and extension validation
//!
//! A directory listing is split into candidates (sample prefix plus an
//! accepted extension) and near-misses (sample prefix, anything else). The
//! first candidate in listing order wins; otherwise the failure is classified
//! so the user can tell a missing file from a wrongly formatted one.

use crate::io::configuration::{ACCEPTED_EXTENSIONS, NO_EXTENSION_LABEL, SAMPLE_PREFIX};
use crate::io::error::{LabError, NearMiss, Result, fs_error};
use std::path::{Path, PathBuf};

/// Whether the lowercased name ends with one of the accepted extensions
pub fn is_accepted_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Final `.suffix` of a file name, or `no extension`
///
/// A leading dot alone does not count as an extension, so `.sample` has none.
pub fn extension_label(name: &str) -> String {
    Path::new(name)
        .extension()
        .map_or_else(
            || NO_EXTENSION_LABEL.to_string(),
            |ext| format!(".{}", ext.to_string_lossy()),
        )
}

/// Pick the sample file out of a listing, preserving the listing order
///
/// # Errors
///
/// Returns `UnsupportedFormat` when prefix-matching files exist but none has
/// an accepted extension, and `SampleNotFound` when no name carries the prefix.
pub fn classify<S: AsRef<str>>(listing: &[S]) -> Result<String> {
    let mut near_misses = Vec::new();

    for name in listing.iter().map(AsRef::as_ref) {
        if !name.starts_with(SAMPLE_PREFIX) {
            continue;
        }
        if is_accepted_extension(name) {
            return Ok(name.to_string());
        }
        near_misses.push(NearMiss {
            name: name.to_string(),
            extension: extension_label(name),
        });
    }

    if near_misses.is_empty() {
        Err(LabError::SampleNotFound {
            files: listing.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    } else {
        Err(LabError::UnsupportedFormat { near_misses })
    }
}

/// Regular file names in `dir`, sorted so selection never depends on OS order
///
/// # Errors
///
/// Returns a file system error if the directory or one of its entries cannot be read
pub fn list_directory(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| fs_error(dir, "read directory", e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| fs_error(dir, "read directory entry", e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| fs_error(entry.path(), "inspect entry", e))?;
        if file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping non UTF-8 file name: {}", raw.to_string_lossy()),
        }
    }

    names.sort();
    Ok(names)
}

/// Locate the sample image inside `dir`
///
/// # Errors
///
/// Propagates listing failures and the two classification failures of [`classify`]
pub fn locate_sample(dir: &Path) -> Result<PathBuf> {
    let names = list_directory(dir)?;
    log::debug!("Files found in {}: {}", dir.display(), names.join(", "));

    let chosen = classify(&names)?;
    log::info!("Using image: {chosen}");
    Ok(dir.join(chosen))
}

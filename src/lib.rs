//! Sample image discovery and classic image-processing demonstrations
//!
//! The locator finds a file named `sample.<extension>` in a directory and
//! explains precisely why when it cannot. Each operation then turns the
//! decoded image into a side-by-side comparison figure.

#![forbid(unsafe_code)]

/// Input/output: lookup, decoding, figures, CLI and error handling
pub mod io;
/// Image-processing demonstrations producing comparison figures
pub mod operations;

pub use io::error::{LabError, Result};

//! Command-line interface: locate the sample, run operations, write figures

use crate::io::configuration::{
    DEFAULT_SEARCH_DIR, DEFAULT_SEED, FIGURE_EXTENSION, FIGURE_PREFIX,
};
use crate::io::error::{LabError, Result};
use crate::io::image::load_image;
use crate::io::locator::locate_sample;
use crate::io::progress::ProgressManager;
use crate::operations::{Operation, OperationContext};
use clap::Parser;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "samplelab")]
#[command(
    author,
    version,
    about = "Find a sample image and render classic image-processing demonstrations"
)]
/// Command-line arguments for the demonstration tool
pub struct Cli {
    /// Operation to run on the sample image
    #[arg(value_enum, default_value_t = Operation::Grayscale)]
    pub operation: Operation,

    /// Directory searched for a file named sample.<extension>
    #[arg(short, long, default_value = DEFAULT_SEARCH_DIR)]
    pub dir: PathBuf,

    /// Directory for figures (defaults to the searched directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Random seed for noise and clustering
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Run every operation instead of a single one
    #[arg(short, long)]
    pub all: bool,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Directory receiving figures
    pub fn output_dir(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.dir)
    }

    /// Operations selected by the arguments, in execution order
    pub fn operations(&self) -> Vec<Operation> {
        if self.all {
            Operation::ALL.to_vec()
        } else {
            vec![self.operation]
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && self.all
    }
}

/// Orchestrates lookup, decoding and the selected operations
pub struct SampleProcessor {
    cli: Cli,
}

impl SampleProcessor {
    /// Create a new processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected operations on the located sample
    ///
    /// # Errors
    ///
    /// Returns an error if no usable sample exists, it cannot be decoded, or
    /// an operation or figure export fails
    pub fn process(&self) -> Result<Vec<PathBuf>> {
        let (source, image) = self.load_sample()?;
        let operations = self.cli.operations();

        let sample_name = source
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(&sample_name, operations.len())
        } else {
            ProgressManager::hidden()
        };

        let context = OperationContext {
            source,
            output_dir: self.cli.output_dir().to_path_buf(),
            seed: self.cli.seed,
        };

        let mut written = Vec::with_capacity(operations.len());
        for operation in operations {
            let start_time = Instant::now();
            progress.start_operation(operation.name());

            let figure = operation.apply(&image, &context)?;
            let path = Self::get_figure_path(self.cli.output_dir(), operation);
            figure.save(&path)?;

            log::debug!("{} took {:?}", operation.name(), start_time.elapsed());
            progress.complete_operation();
            written.push(path);
        }

        progress.finish();
        log::info!("Image processed successfully!");
        Ok(written)
    }

    fn load_sample(&self) -> Result<(PathBuf, DynamicImage)> {
        log::info!("Looking for image files in {}", self.cli.dir.display());
        let source = locate_sample(&self.cli.dir)?;
        let image = load_image(&source)?;
        Ok((source, image))
    }

    /// `<output_dir>/output_<operation>.png`
    ///
    /// Figures may land in the searched directory, so their names must not
    /// start with the sample prefix.
    pub fn get_figure_path(output_dir: &Path, operation: Operation) -> PathBuf {
        output_dir.join(format!(
            "{FIGURE_PREFIX}_{}.{FIGURE_EXTENSION}",
            operation.name()
        ))
    }
}

/// Print the troubleshooting text of a failed run to stdout
// Allow print for the user-facing troubleshooting text
#[allow(clippy::print_stdout)]
pub fn report(error: &LabError) {
    println!("\n{}", error.diagnostic());
}

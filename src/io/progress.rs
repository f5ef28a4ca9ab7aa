//! Progress display while several operations run on the same sample

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static OPERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks which operation is running and how many have finished
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Progress bar over `operation_count` operations on `sample`
    pub fn new(sample: &str, operation_count: usize) -> Self {
        let bar = ProgressBar::new(operation_count as u64);
        bar.set_style(OPERATION_STYLE.clone());
        bar.set_prefix(sample.to_string());
        Self { bar }
    }

    /// Hidden progress bar, used when output is suppressed
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show the operation currently running
    pub fn start_operation(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    /// Count one operation as done
    pub fn complete_operation(&self) {
        self.bar.inc(1);
    }

    /// Number of operations completed so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar once every operation is done
    pub fn finish(&self) {
        self.bar.finish_with_message("all operations processed");
    }
}

//! CLI entry point for the sample image demonstrations

use clap::Parser;
use samplelab::io::cli::{Cli, SampleProcessor, report};
use samplelab::io::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    match SampleProcessor::new(cli).process() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

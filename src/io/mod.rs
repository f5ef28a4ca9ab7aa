/// Command-line parsing and orchestration
pub mod cli;
/// Lookup rules, operation parameters and output defaults
pub mod configuration;
/// Error type and user-facing diagnostics
pub mod error;
/// Side-by-side figures and histogram charts
pub mod figure;
/// Decoding, saving and JPEG encoding
pub mod image;
/// Sample image discovery
pub mod locator;
/// Logger setup
pub mod logging;
/// Progress display across operations
pub mod progress;

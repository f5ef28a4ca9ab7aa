//! Log initialisation for the command-line tool

use log::LevelFilter;

/// Level used when `RUST_LOG` is unset
pub const fn default_level(quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger; `RUST_LOG` takes precedence over `quiet`
///
/// Calling this more than once keeps the first logger.
pub fn init(quiet: bool) {
    let _ = env_logger::Builder::new()
        .filter_level(default_level(quiet))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

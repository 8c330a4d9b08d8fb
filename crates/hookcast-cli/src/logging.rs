// Logging and verbosity control

use tracing::level_filters::LevelFilter;

/// Tracing level selected by the global flags
///
/// `--quiet` wins over `--verbose`.
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the stderr subscriber
///
/// Stdout is reserved for the report, so log lines never mix with JSON
/// output. Calling this twice keeps the first subscriber.
pub fn init_logging(verbose: bool, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

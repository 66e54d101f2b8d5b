//! Runtime logging
//!
//! Logs go to stderr so they never mix with program output on stdout.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// Safe to call more than once; only the first call installs anything.
/// An unparsable filter falls back to the default directive.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

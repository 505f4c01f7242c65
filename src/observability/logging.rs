//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the filter: `RUST_LOG`, then verbose mode, then config
//!
//! # Design Decisions
//! - Logs go to stderr so stdout stays machine-readable
//! - Credentials are never recorded

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolve the filter directive to use.
pub fn filter_directive(log_level: &str, verbose: bool) -> String {
    if verbose {
        "cdn_sync=debug,info".to_string()
    } else {
        log_level.to_string()
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(log_level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level, verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

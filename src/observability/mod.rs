//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reconcile / api / store produce:
//!     → tracing events with structured fields (zone, key, from, to, status)
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! ```

pub mod logging;

pub use logging::init_logging;

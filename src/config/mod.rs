//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flags / environment (ConfigOverrides)
//!     → validation.rs (semantic checks)
//!     → SyncConfig (validated, immutable for the run)
//!     → api::CdnClient::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Credentials are never logged

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigOverrides};
pub use schema::{ApiConfig, AuthConfig, ObservabilityConfig, SyncConfig};
pub use validation::ValidationError;

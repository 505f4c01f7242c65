//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the root URL is an absolute http(s) URL
//! - Check credentials are present
//! - Validate value ranges (timeout > 0) and the log filter
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SyncConfig → Result<(), Vec<ValidationError>>
//! - Runs after CLI overrides are merged, before any request is built

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::schema::SyncConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.root_url '{url}' is not a valid URL: {reason}")]
    InvalidRootUrl { url: String, reason: String },

    #[error("api.root_url must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("auth.{0} is required")]
    MissingCredential(&'static str),

    #[error("api.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level '{0}' is not a valid filter")]
    InvalidLogLevel(String),
}

/// Validate a merged configuration.
pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.root_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidRootUrl {
            url: config.api.root_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.auth.email.trim().is_empty() {
        errors.push(ValidationError::MissingCredential("email"));
    }
    if config.auth.key.trim().is_empty() {
        errors.push(ValidationError::MissingCredential("key"));
    }

    if config.api.request_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

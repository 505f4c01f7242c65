//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML settings
//! file. Every field has a default so a minimal (or absent) file works.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Root URL of the Cloudflare v4 API.
pub const DEFAULT_ROOT_URL: &str = "https://api.cloudflare.com/client/v4";

/// Root configuration for a sync run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Endpoint settings.
    pub api: ApiConfig,

    /// Credentials sent with every request.
    pub auth: AuthConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL that request paths are appended to.
    pub root_url: String,

    /// Whole-request timeout in seconds. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Account credentials.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Account email, sent as `X-Auth-Email`.
    pub email: String,

    /// API key, sent as `X-Auth-Key`.
    pub key: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

//! The response envelope wrapped around every API payload.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};

/// One entry of the envelope's `errors` list.
///
/// Older API versions send plain strings, newer ones send `{code, message}`
/// objects. Which variant applies is decided by the JSON token type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    Message(String),
    Coded {
        code: i64,
        #[serde(default)]
        message: String,
    },
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorEntry::Message(message) => f.write_str(message),
            ErrorEntry::Coded { code, message } => write!(f, "{} (code {})", message, code),
        }
    }
}

/// Top-level API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,

    #[serde(default)]
    pub errors: Vec<ErrorEntry>,

    /// Informational messages. Kept untyped; the core never inspects them.
    #[serde(default)]
    pub messages: Vec<Value>,

    /// Endpoint-specific payload, decoded by the caller.
    #[serde(default)]
    pub result: Value,
}

impl ApiEnvelope {
    /// Whether the envelope reports success and carries no errors.
    pub fn is_success(&self) -> bool {
        self.success && self.errors.is_empty()
    }

    /// Decode the raw result into the shape the endpoint promises.
    pub fn into_result<T: DeserializeOwned>(self) -> ApiResult<T> {
        serde_json::from_value(self.result).map_err(ApiError::MalformedResponse)
    }

    /// One-line summary of the errors, for display.
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "no errors reported".to_string();
        }
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

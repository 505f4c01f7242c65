//! Error definitions for API operations.

use thiserror::Error;

use crate::api::envelope::ApiEnvelope;

/// Errors that can occur while talking to the CDN API.
///
/// None of these are retried; each one ends the operation that raised it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The method/URL combination (or the body) could not form a request.
    #[error("Failed to construct request: {0}")]
    RequestConstruction(String),

    /// Connection refused, DNS failure, timeout, or a broken response body.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Anything other than 200. The body is kept even when it is not JSON.
    #[error("Unexpected HTTP status {status}, body: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The body is not valid JSON for the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The envelope reported failure, or carried errors despite `success`.
    #[error("Response indicated failure (success: {}): {}", .0.success, .0.error_summary())]
    RemoteFailure(Box<ApiEnvelope>),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// A plan stopped part way through.
///
/// Settings listed in `applied` were changed on the remote before `key`
/// failed, and they stay changed.
#[derive(Debug, Error)]
#[error("Updating setting '{key}' failed after {} other change(s) were applied: {source}", .applied.len())]
pub struct ApplyError {
    /// The setting whose update failed.
    pub key: String,
    /// Settings already changed, in the order they were applied.
    pub applied: Vec<String>,
    #[source]
    pub source: ApiError,
}

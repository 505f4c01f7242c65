//! CDN API client subsystem.
//!
//! # Data Flow
//! ```text
//! SyncConfig (root URL, credentials)
//!     → client.rs (build_request → send)
//!     → envelope.rs (status, JSON, success flag, error list)
//!     → types.rs (ZoneItem, RemoteSetting → ConfigSnapshot)
//!
//! UpdatePlan
//!     → client.rs apply_plan (one PATCH per key, stop at first failure)
//! ```
//!
//! # Design Decisions
//! - No global state: credentials travel inside the client
//! - No retries: every failure is surfaced to the caller
//! - At most one request in flight; `apply_plan` awaits each PATCH
//! - A partially applied plan is reported, never rolled back

pub mod client;
pub mod envelope;
pub mod error;
pub mod types;

pub use client::CdnClient;
pub use envelope::{ApiEnvelope, ErrorEntry};
pub use error::{ApiError, ApiResult, ApplyError};
pub use types::{RemoteSetting, ZoneItem};

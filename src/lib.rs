//! CDN zone settings synchronization library.
//!
//! Compares a zone's remote settings with a local desired-state file and
//! pushes the differences through the CDN API.

pub mod api;
pub mod config;
pub mod observability;
pub mod reconcile;
pub mod store;

pub use api::CdnClient;
pub use config::SyncConfig;
pub use reconcile::{compare_for_update, ConfigMismatch, ConfigSnapshot, SettingValue, UpdatePlan};

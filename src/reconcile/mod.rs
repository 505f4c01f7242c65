//! Configuration reconciliation subsystem.
//!
//! # Data Flow
//! ```text
//! remote settings (actual)      local file (desired)
//!     → snapshot.rs (ConfigSnapshot, union / difference)
//!     → plan.rs (compare_for_update)
//!     → UpdatePlan  |  ConfigMismatch
//!     → api::CdnClient::apply_plan
//! ```
//!
//! # Design Decisions
//! - Pure functions only: no network, no disk
//! - Value equality is defined once on `SettingValue` and reused everywhere
//! - Snapshots are ordered maps so plans are walked in a stable order
//! - A desired key unknown to the remote is an error, never an insert

pub mod plan;
pub mod snapshot;
pub mod value;

pub use plan::{compare_for_update, unmanaged, ConfigMismatch, PlannedChange, UpdatePlan};
pub use snapshot::ConfigSnapshot;
pub use value::SettingValue;

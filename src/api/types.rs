//! Wire types for the zones and settings endpoints.

use serde::{Deserialize, Serialize};

use crate::reconcile::{ConfigSnapshot, SettingValue};

/// A zone as listed by `GET /zones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneItem {
    pub id: String,
    pub name: String,
}

/// One entry of `GET /zones/{zone}/settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSetting {
    pub id: String,
    pub value: SettingValue,
    /// Opaque timestamp, passed through untouched.
    #[serde(default)]
    pub modified_on: Option<String>,
    #[serde(default)]
    pub editable: bool,
}

/// Fold settings into a snapshot. If the remote ever repeats an id, the
/// last one wins.
pub fn settings_snapshot(settings: Vec<RemoteSetting>) -> ConfigSnapshot {
    settings
        .into_iter()
        .map(|setting| (setting.id, setting.value))
        .collect()
}

/// Body of `PATCH /zones/{zone}/settings/{key}`.
#[derive(Debug, Serialize)]
pub struct SettingUpdate<'a> {
    pub value: &'a SettingValue,
}

//! Update planning: what must change remotely to match the local config.

use std::collections::btree_map;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::reconcile::snapshot::ConfigSnapshot;
use crate::reconcile::value::SettingValue;

/// A single pending change to a remote setting.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    /// Value currently held by the remote.
    pub current: SettingValue,
    /// Value the local config asks for.
    pub expected: SettingValue,
}

/// The per-key changes needed to bring the remote in line with the local
/// config. Every key is one the remote already knows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlan(BTreeMap<String, PlannedChange>);

impl UpdatePlan {
    pub fn get(&self, key: &str) -> Option<&PlannedChange> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in key order. `apply_plan` relies on this being stable.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PlannedChange> {
        self.0.iter()
    }
}

impl FromIterator<(String, PlannedChange)> for UpdatePlan {
    fn from_iter<I: IntoIterator<Item = (String, PlannedChange)>>(iter: I) -> Self {
        UpdatePlan(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a UpdatePlan {
    type Item = (&'a String, &'a PlannedChange);
    type IntoIter = btree_map::Iter<'a, String, PlannedChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The local config names settings the remote does not have.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} setting(s) in the local config are not present in the CDN config: {}", .missing.len(), missing_keys(.missing))]
pub struct ConfigMismatch {
    /// The offending entries, with their desired values.
    pub missing: ConfigSnapshot,
}

fn missing_keys(missing: &ConfigSnapshot) -> String {
    missing.keys().collect::<Vec<_>>().join(", ")
}

/// Compare remote (`actual`) and local (`desired`) settings.
///
/// Desired may be a subset of actual: remote settings the local config does
/// not mention are left alone (see [`unmanaged`]). A desired key that actual
/// does not contain cannot be updated and fails the whole comparison.
pub fn compare_for_update(
    actual: &ConfigSnapshot,
    desired: &ConfigSnapshot,
) -> Result<UpdatePlan, ConfigMismatch> {
    let union = actual.union(desired);

    let mut missing = ConfigSnapshot::new();
    let mut changes = BTreeMap::new();
    for (key, expected) in actual.difference(&union) {
        match actual.get(&key) {
            Some(current) => {
                let current = current.clone();
                changes.insert(key, PlannedChange { current, expected });
            }
            None => {
                missing.insert(key, expected);
            }
        }
    }

    if !missing.is_empty() {
        return Err(ConfigMismatch { missing });
    }

    Ok(UpdatePlan(changes))
}

/// Remote settings that the local config does not mention.
pub fn unmanaged(actual: &ConfigSnapshot, desired: &ConfigSnapshot) -> ConfigSnapshot {
    desired.difference(&actual.union(desired))
}

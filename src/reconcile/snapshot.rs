//! Configuration snapshots and the set operations over them.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reconcile::value::SettingValue;

/// A complete set of setting id → value pairs observed at one point in time.
///
/// Serializes as a flat JSON object, which is also the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSnapshot(BTreeMap<String, SettingValue>);

impl ConfigSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Option<SettingValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, SettingValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge `other` over `self`. On keys present in both, `other` wins.
    pub fn union(&self, other: &ConfigSnapshot) -> ConfigSnapshot {
        let mut merged = self.0.clone();
        for (key, value) in &other.0 {
            merged.insert(key.clone(), value.clone());
        }
        ConfigSnapshot(merged)
    }

    /// Entries of `to` whose value differs from `self`, or which `self`
    /// does not have at all.
    ///
    /// One-directional: `a.difference(&b)` and `b.difference(&a)` are
    /// generally different sets.
    pub fn difference(&self, to: &ConfigSnapshot) -> ConfigSnapshot {
        to.0.iter()
            .filter(|(key, value)| self.0.get(key.as_str()) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for ConfigSnapshot {
    /// Later entries overwrite earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ConfigSnapshot(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for ConfigSnapshot {
    type Item = (String, SettingValue);
    type IntoIter = btree_map::IntoIter<String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigSnapshot {
    type Item = (&'a String, &'a SettingValue);
    type IntoIter = btree_map::Iter<'a, String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

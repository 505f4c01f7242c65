//! Snapshot persistence.
//!
//! The local desired state is a flat JSON object of setting id → value,
//! written with 4-space indentation and sorted keys so downloads diff
//! cleanly under version control.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::reconcile::ConfigSnapshot;

/// Errors reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {} as a settings object: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<ConfigSnapshot, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a snapshot to a JSON file, replacing any existing content.
pub fn save_snapshot(snapshot: &ConfigSnapshot, path: &Path) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    snapshot
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    buf.push(b'\n');

    fs::write(path, buf).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), settings = snapshot.len(), "Saved snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::SettingValue;

    #[test]
    fn test_save_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone.json");

        let mut snapshot = ConfigSnapshot::new();
        snapshot.insert("browser_cache_ttl", 14400u64);
        snapshot.insert("always_online", "off");
        save_snapshot(&snapshot, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n    \"always_online\": \"off\",\n    \"browser_cache_ttl\": 14400\n}\n"
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone.json");

        let mut snapshot = ConfigSnapshot::new();
        snapshot.insert("ipv6", "on");
        snapshot.insert("max_upload", 100u64);
        snapshot.insert("development_mode", false);
        snapshot.insert(
            "minify",
            SettingValue::from(serde_json::json!({"css": "on", "html": "off", "js": "on"})),
        );
        save_snapshot(&snapshot, &path).unwrap();

        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_load_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(load_snapshot(&path), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}

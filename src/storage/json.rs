//! JSON file-based key-value backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) - parses the whole file on every `get`
//! - **Write**: O(n) - serializes and writes the entire map
//! - **Best for**: a handful of keys, infrequent writes

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::{CineSearchError, Result};
use crate::storage::backend::KeyValueStore;

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk. Wraps the entries in a
/// versioned object so the layout can be migrated later.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored values by key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value backend.
///
/// The file is read on every `get` and rewritten on every `set`, so the
/// store never holds a stale copy of what is on disk.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "favorites": "[{\"id\":\"tt1\",\"title\":\"X\",\"year\":\"2020\",\"posterUrl\":\"N/A\"}]"
///   }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `file_path`.
    ///
    /// No I/O happens until the first `get` or `set`. A missing file reads as
    /// an empty store.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        tracing::debug!(path = ?file_path, "initializing JSON key-value store");
        Self { file_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the raw file, or `None` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    async fn read_contents(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!(path = ?self.file_path, "store file absent, treating as empty");
                Ok(None)
            }
            Err(e) => Err(CineSearchError::Storage(format!(
                "failed to read {}: {e}",
                self.file_path.display()
            ))),
        }
    }

    fn parse(contents: &str) -> Result<StorageData> {
        let data: StorageData = serde_json::from_str(contents)
            .map_err(|e| CineSearchError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded store data"
        );

        Ok(data)
    }

    /// Loads the container from disk, or an empty one if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    async fn load_from_file(&self) -> Result<StorageData> {
        match self.read_contents().await? {
            Some(contents) => Self::parse(&contents),
            None => Ok(StorageData::default()),
        }
    }

    /// Loads the container for a write.
    ///
    /// Unlike [`load_from_file`](Self::load_from_file), a file that does not
    /// parse is moved aside to `<name>.corrupt` and replaced by an empty
    /// container, so one bad file cannot block every later write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or was written by a newer
    /// format version.
    async fn load_for_write(&self) -> Result<StorageData> {
        let Some(contents) = self.read_contents().await? else {
            return Ok(StorageData::default());
        };

        let data = match Self::parse(&contents) {
            Ok(data) => data,
            Err(e) => {
                let corrupt = self.corrupt_path();
                tracing::warn!(error = %e, moved_to = ?corrupt, "store file is malformed, starting empty");
                if let Err(e) = tokio::fs::rename(&self.file_path, &corrupt).await {
                    tracing::warn!(error = %e, "failed to move malformed store file aside");
                }
                return Ok(StorageData::default());
            }
        };

        if data.version > FORMAT_VERSION {
            return Err(CineSearchError::Storage(format!(
                "{} uses format version {}, newer than supported version {FORMAT_VERSION}",
                self.file_path.display(),
                data.version
            )));
        }

        Ok(data)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Saves the container to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory, the temporary file or the
    /// rename fails.
    async fn save_to_file(&self, data: &StorageData) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving store data");

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CineSearchError::Storage(format!("failed to serialize JSON: {e}")))?;

        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CineSearchError::Storage(format!("failed to create {}: {e}", parent.display())))?;
        }

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| CineSearchError::Storage(format!("failed to write {}: {e}", tmp_path.display())))?;

        tracing::trace!("renaming temporary file to final location");
        tokio::fs::rename(&tmp_path, &self.file_path)
            .await
            .map_err(|e| CineSearchError::Storage(format!("failed to replace {}: {e}", self.file_path.display())))?;

        tracing::debug!("store saved successfully");
        Ok(())
    }
}

#[async_trait(?Send)]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.load_from_file().await?;
        let value = data.entries.get(key).cloned();

        tracing::debug!(key = %key, found = value.is_some(), "store lookup complete");
        Ok(value)
    }

    async fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut data = self.load_for_write().await?;
        data.version = FORMAT_VERSION;
        data.entries.insert(key.to_string(), value);
        self.save_to_file(&data).await?;

        tracing::debug!(key = %key, "store value written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::new(path.clone());
        store.set("favorites", "[]".to_string()).await.unwrap();
        store.set("other", "x".to_string()).await.unwrap();

        let reopened = JsonFileStore::new(path.clone());
        assert_eq!(reopened.get("favorites").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("other").await.unwrap().as_deref(), Some("x"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_fails_reads_but_not_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::new(path.clone());
        assert!(store.get("favorites").await.unwrap_err().is_storage());

        store.set("favorites", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap().as_deref(), Some("[]"));

        let corrupt = dir.path().join("store.json.corrupt");
        assert_eq!(std::fs::read_to_string(corrupt).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn newer_format_version_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let newer = r#"{"version":2,"entries":{"favorites":"[]"}}"#;
        std::fs::write(&path, newer).unwrap();

        let mut store = JsonFileStore::new(path.clone());
        let err = store.set("favorites", "x".to_string()).await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(std::fs::read_to_string(path).unwrap(), newer);
    }
}

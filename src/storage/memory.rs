//! In-memory key-value backend.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::error::{CineSearchError, Result};
use crate::storage::backend::KeyValueStore;

/// Process-local key-value store.
///
/// Nothing survives the process. Writes can be made to fail on demand with
/// [`MemoryStore::fail_writes`], which is how the favorites tests exercise the
/// write-failure path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Makes every subsequent `set` fail with a storage error when `fail` is true.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Returns the stored value without going through the async trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<()> {
        if self.fail_writes {
            return Err(CineSearchError::Storage(format!("write to {key} rejected")));
        }
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

//! Key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over
//! different persistence backends. Values are opaque strings; callers own the
//! serialization of whatever they keep under a key.
//!
//! # Design Philosophy
//!
//! The trait is deliberately minimal: the favorites store reads one key in
//! full and rewrites it in full, so a get and a set are all it needs.

use async_trait::async_trait;

use crate::domain::error::Result;

/// Abstraction over local persistent key-value storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map, used in tests
///
/// # Examples
///
/// ```no_run
/// use cinesearch::storage::{JsonFileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// # async fn demo() -> cinesearch::Result<()> {
/// let mut store = JsonFileStore::new(PathBuf::from("/tmp/store.json"));
/// store.set("favorites", "[]".to_string()).await?;
/// assert_eq!(store.get("favorites").await?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
#[async_trait(?Send)]
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Storage`](crate::CineSearchError::Storage)
    /// if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// The write has completed (or failed) when the returned future resolves.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Storage`](crate::CineSearchError::Storage)
    /// if the backend cannot be written.
    async fn set(&mut self, key: &str, value: String) -> Result<()>;
}

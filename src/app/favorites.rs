//! Locally persisted favorites.
//!
//! [`FavoritesStore`] keeps the user's favorite movies as a set keyed by movie
//! id. The whole set lives in a [`KeyValueStore`] under [`FAVORITES_KEY`] as a
//! JSON array of [`MovieSummary`]; it is read in full on load and rewritten in
//! full after every toggle.
//!
//! # Consistency
//!
//! A failed write is reported to the caller but the in-memory set keeps the
//! toggled state. Memory and storage then disagree until the next successful
//! write, or until a reload from storage.

use std::collections::HashSet;

use tracing::Instrument;

use crate::app::modes::FavoritesPhase;
use crate::domain::error::{CineSearchError, Result};
use crate::domain::MovieSummary;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized favorites set.
pub const FAVORITES_KEY: &str = "favorites";

/// Favorite movies backed by a key-value store.
///
/// Insertion order is kept for display; membership is by `id`.
///
/// # Example
///
/// ```
/// use cinesearch::app::FavoritesStore;
/// use cinesearch::domain::MovieSummary;
/// use cinesearch::storage::MemoryStore;
///
/// # async fn demo() -> cinesearch::Result<()> {
/// let mut favorites = FavoritesStore::new(MemoryStore::new());
/// favorites.load().await;
///
/// let movie = MovieSummary::new("tt0372784", "Batman Begins", "2005", "N/A");
/// assert!(favorites.toggle(&movie).await?);
/// assert!(favorites.is_favorite("tt0372784"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    favorites: Vec<MovieSummary>,
    phase: FavoritesPhase,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Creates a store that has not read its persisted set yet.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            favorites: Vec::new(),
            phase: FavoritesPhase::NotLoaded,
        }
    }

    /// Reads the persisted set, replacing whatever is in memory.
    ///
    /// An absent key, unreadable storage and malformed data all yield an
    /// empty set; the latter two are logged. Duplicate ids keep their first
    /// occurrence. Returns the number of favorites loaded.
    pub async fn load(&mut self) -> usize {
        let span = tracing::debug_span!("favorites_load", key = FAVORITES_KEY);

        let stored = match self.store.get(FAVORITES_KEY).instrument(span).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                None
            }
        };

        self.favorites = stored.map_or_else(Vec::new, |raw| Self::decode(&raw));
        self.phase = FavoritesPhase::Loaded;

        tracing::debug!(count = self.favorites.len(), "favorites loaded");
        self.favorites.len()
    }

    /// Whether a movie with `id` is in the in-memory set.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|m| m.id == id)
    }

    /// Adds `movie` if it is not a favorite, removes it if it is.
    ///
    /// Loads the persisted set first if that has not happened yet. The full
    /// resulting set is written back before this returns. Returns whether the
    /// movie is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Storage`] if the write fails. The in-memory
    /// toggle is kept regardless.
    pub async fn toggle(&mut self, movie: &MovieSummary) -> Result<bool> {
        if self.phase == FavoritesPhase::NotLoaded {
            self.load().await;
        }

        let now_favorite = if let Some(pos) = self.favorites.iter().position(|m| m.id == movie.id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(movie.clone());
            true
        };

        tracing::debug!(
            id = %movie.id,
            now_favorite = now_favorite,
            count = self.favorites.len(),
            "favorite toggled"
        );

        if let Err(e) = self.persist().await {
            tracing::error!(id = %movie.id, error = %e, "failed to save favorites");
            return Err(e);
        }

        Ok(now_favorite)
    }

    /// Favorites in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[MovieSummary] {
        &self.favorites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    #[must_use]
    pub const fn phase(&self) -> FavoritesPhase {
        self.phase
    }

    /// The backing key-value store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing key-value store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    async fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.favorites)
            .map_err(|e| CineSearchError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.store.set(FAVORITES_KEY, json).await
    }

    fn decode(raw: &str) -> Vec<MovieSummary> {
        let movies: Vec<MovieSummary> = match serde_json::from_str(raw) {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!(error = %e, "stored favorites are malformed, starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        movies
            .into_iter()
            .filter(|m| seen.insert(m.id.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const ONE_FAVORITE: &str = r#"[{"id":"tt1","title":"X","year":"2020","posterUrl":"N/A"}]"#;

    fn movie(id: &str) -> MovieSummary {
        MovieSummary::new(id, format!("Title {id}"), "1999", "N/A")
    }

    #[tokio::test]
    async fn load_reads_reserved_key() {
        let mut favorites = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, ONE_FAVORITE));
        assert!(!favorites.is_favorite("tt1"));

        assert_eq!(favorites.load().await, 1);
        assert!(favorites.is_favorite("tt1"));
        assert_eq!(favorites.phase(), FavoritesPhase::Loaded);
        assert_eq!(favorites.favorites()[0].title, "X");
    }

    #[tokio::test]
    async fn absent_key_loads_empty() {
        let mut favorites = FavoritesStore::new(MemoryStore::new());
        assert_eq!(favorites.load().await, 0);
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn malformed_data_loads_empty() {
        for raw in ["not json", r#"{"id":"tt1"}"#, r#"[{"id":"tt1"}]"#] {
            let mut favorites = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, raw));
            assert_eq!(favorites.load().await, 0, "input: {raw}");
        }
    }

    #[tokio::test]
    async fn legacy_catalog_shaped_entries_load() {
        let raw = r#"[{"Title":"Batman","Year":"1989","imdbID":"tt0096895","Type":"movie","Poster":"N/A"}]"#;
        let mut favorites = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, raw));
        favorites.load().await;
        assert!(favorites.is_favorite("tt0096895"));
    }

    #[tokio::test]
    async fn duplicate_ids_keep_first_occurrence() {
        let raw = r#"[
            {"id":"tt1","title":"First","year":"2020","posterUrl":"N/A"},
            {"id":"tt2","title":"Other","year":"2021","posterUrl":"N/A"},
            {"id":"tt1","title":"Second","year":"2020","posterUrl":"N/A"}
        ]"#;
        let mut favorites = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, raw));
        assert_eq!(favorites.load().await, 2);
        assert_eq!(favorites.favorites()[0].title, "First");
    }

    #[tokio::test]
    async fn toggle_twice_restores_membership() {
        let mut favorites = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, ONE_FAVORITE));
        favorites.load().await;
        let before: Vec<String> = favorites.favorites().iter().map(|m| m.id.clone()).collect();

        assert!(favorites.toggle(&movie("tt9")).await.unwrap());
        assert!(favorites.is_favorite("tt9"));
        assert!(!favorites.toggle(&movie("tt9")).await.unwrap());

        let after: Vec<String> = favorites.favorites().iter().map(|m| m.id.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(favorites.store().writes(), 2);
    }

    #[tokio::test]
    async fn toggle_writes_full_set() {
        let mut favorites = FavoritesStore::new(MemoryStore::new());
        favorites.load().await;
        favorites.toggle(&movie("tt1")).await.unwrap();
        favorites.toggle(&movie("tt2")).await.unwrap();

        let stored: Vec<MovieSummary> =
            serde_json::from_str(favorites.store().peek(FAVORITES_KEY).unwrap()).unwrap();
        assert_eq!(stored, vec![movie("tt1"), movie("tt2")]);
    }

    #[tokio::test]
    async fn toggle_before_load_keeps_persisted_set() {
        let mut favorites = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, ONE_FAVORITE));
        favorites.toggle(&movie("tt2")).await.unwrap();

        assert!(favorites.is_favorite("tt1"));
        assert!(favorites.is_favorite("tt2"));
        assert_eq!(favorites.len(), 2);
    }

    #[tokio::test]
    async fn failed_write_is_reported_without_rollback() {
        let mut favorites = FavoritesStore::new(MemoryStore::new());
        favorites.load().await;
        favorites.store_mut().fail_writes(true);

        let err = favorites.toggle(&movie("tt1")).await.unwrap_err();
        assert!(err.is_storage());
        assert!(favorites.is_favorite("tt1"));
        assert_eq!(favorites.store().peek(FAVORITES_KEY), None);

        // The next successful write brings storage back in line.
        favorites.store_mut().fail_writes(false);
        favorites.toggle(&movie("tt2")).await.unwrap();
        let stored: Vec<MovieSummary> =
            serde_json::from_str(favorites.store().peek(FAVORITES_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
    }
}

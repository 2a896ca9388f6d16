//! cinesearch: movie catalog search with locally persisted favorites.
//!
//! cinesearch is the client-side core of a movie browser:
//! - Search a remote OMDb-style catalog and page through results incrementally
//! - Fetch the full record of a single title on demand
//! - Mark favorites, persisted as one JSON blob in a local key-value store
//!
//! Presentation (layout, navigation, styling) is out of scope; a front end
//! drives the types here and renders the plain data they expose. The
//! `cinesearch` binary is one such front end, a line-oriented terminal shim.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation (main.rs terminal shim, or any UI)    │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - SearchSession: query, pages, single-fetch guard  │
//! │  - FavoritesStore: toggle/read over key-value store │
//! │  - load_details: per-title lookup                   │
//! └─────────────────────────────────────────────────────┘
//!              │                          │
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │ Catalog Layer (catalog/) │  │ Storage Layer (storage/) │
//! │ - MovieCatalog trait     │  │ - KeyValueStore trait    │
//! │ - OmdbClient (reqwest)   │  │ - JsonFileStore          │
//! │ - wire JSON models       │  │ - MemoryStore            │
//! └──────────────────────────┘  └──────────────────────────┘
//!              │                          │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Movie models, error types (domain/)              │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Rotating-file logging (observability/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: search session, favorites store, detail lookup
//! - [`catalog`]: remote catalog trait and HTTP client
//! - [`domain`]: movie models and errors
//! - [`infrastructure`]: platform paths
//! - [`storage`]: key-value backends
//! - [`observability`]: tracing subscriber setup
//!
//! # Configuration
//!
//! Settings are read from, lowest to highest precedence: built-in defaults, a
//! TOML file, and `CINESEARCH_*` environment variables.
//!
//! ```toml
//! # ~/.config/cinesearch/config.toml
//! api_key = "abcd1234"
//! base_url = "https://www.omdbapi.com/"
//! timeout_secs = 10
//! data_dir = "~/.local/share/cinesearch"
//! trace_level = "debug"
//! ```
//!
//! # Concurrency
//!
//! Everything runs on one cooperative thread (a current-thread tokio runtime).
//! The catalog and storage traits are `?Send` and the search session uses
//! `RefCell` state that is never borrowed across an `.await`.
//!
//! # Examples
//!
//! ```no_run
//! use cinesearch::{initialize, Config};
//!
//! # async fn demo() -> cinesearch::Result<()> {
//! let config = Config::load(None)?;
//! let mut app = initialize(&config)?;
//!
//! app.favorites.load().await;
//! app.search.set_query("batman");
//! app.search.run_search().await;
//!
//! if let Some(first) = app.search.item(0) {
//!     app.favorites.toggle(&first).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod observability;

pub use app::{FavoritesStore, FetchOutcome, SearchSession};
pub use catalog::{MovieCatalog, OmdbClient};
pub use domain::{CineSearchError, MovieDetail, MovieSummary, Result, SearchResultPage};
pub use storage::{JsonFileStore, KeyValueStore};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "CINESEARCH_";

/// Application configuration.
///
/// Built from a flat string map (see [`Config::from_map`]) so every source,
/// TOML file or environment, goes through the same parsing and fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog API key. Required before any request can be made.
    pub api_key: Option<String>,

    /// Catalog endpoint. Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub timeout_secs: u64,

    /// Directory for the key-value store and the log file.
    ///
    /// `~` is expanded. Default: the platform data directory joined with
    /// `cinesearch`.
    pub data_dir: Option<PathBuf>,

    /// `EnvFilter` directive for logging.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any filter
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_key`: String → `Option<String>` (blank values ignored)
    /// - `base_url`: String (falls back to the default when blank)
    /// - `timeout_secs`: String → `u64` (falls back to 10 on parse error or 0)
    /// - `data_dir`: String → `PathBuf` with `~` expanded
    /// - `trace_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinesearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abcd1234".to_string());
    /// map.insert("timeout_secs".to_string(), "3".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abcd1234"));
    /// assert_eq!(config.timeout_secs, 3);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            map.get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let timeout_secs = non_blank("timeout_secs")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key: non_blank("api_key"),
            base_url: non_blank("base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs,
            data_dir: non_blank("data_dir").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: non_blank("trace_level"),
        }
    }

    /// Builds configuration from optional TOML text and environment pairs.
    ///
    /// TOML keys are read first; `CINESEARCH_<KEY>` pairs from `env` then
    /// override them. Non-string TOML values are used in their TOML form
    /// (`timeout_secs = 5` reads as `"5"`).
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Config`] if the TOML text does not parse.
    pub fn from_sources<I>(toml_text: Option<&str>, env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = BTreeMap::new();

        if let Some(text) = toml_text {
            let table: toml::Table = toml::from_str(text)
                .map_err(|e| CineSearchError::Config(format!("failed to parse config file: {e}")))?;
            for (key, value) in table {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, value);
            }
        }

        for (key, value) in env {
            if let Some(name) = key.strip_prefix(ENV_PREFIX) {
                map.insert(name.to_lowercase(), value);
            }
        }

        Ok(Self::from_map(&map))
    }

    /// Loads configuration from a TOML file and the process environment.
    ///
    /// With `path = None` the default location is used if it exists. An
    /// explicit `path` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Config`] if an explicit file is missing or
    /// does not parse, and [`CineSearchError::Io`] if it exists but cannot be
    /// read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(CineSearchError::Config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => infrastructure::default_config_file().filter(|p| p.exists()),
        };

        let text = file.as_ref().map(std::fs::read_to_string).transpose()?;

        tracing::debug!(file = ?file, "loading configuration");
        Self::from_sources(text.as_deref(), std::env::vars())
    }

    /// Effective data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::default_data_dir)
    }

    /// Path of the key-value store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        infrastructure::store_file(&self.data_dir())
    }
}

/// The two stateful components a front end drives.
///
/// Owned by the caller and passed by reference to whatever renders them.
#[derive(Debug)]
pub struct App {
    /// Search state for the results list.
    pub search: SearchSession<OmdbClient>,

    /// Favorites, not yet loaded.
    pub favorites: FavoritesStore<JsonFileStore>,
}

/// Builds the application from configuration.
///
/// Creates the catalog client and a favorites store backed by the JSON file
/// at [`Config::store_path`]. Nothing is read or fetched yet.
///
/// # Errors
///
/// Returns [`CineSearchError::Config`] if no API key is configured or the HTTP
/// client cannot be built.
pub fn initialize(config: &Config) -> Result<App> {
    tracing::debug!(base_url = %config.base_url, "initializing cinesearch");

    let client = OmdbClient::from_config(config)?;
    let store = JsonFileStore::new(config.store_path());

    Ok(App {
        search: SearchSession::new(client),
        favorites: FavoritesStore::new(store),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_to_empty_sources() {
        let config = Config::from_sources(None, Vec::new()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn toml_values_are_read() {
        let text = r#"
            api_key = "from-file"
            timeout_secs = 5
            data_dir = "/var/lib/cinesearch"
        "#;
        let config = Config::from_sources(Some(text), Vec::new()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.store_path(), PathBuf::from("/var/lib/cinesearch/store.json"));
    }

    #[test]
    fn environment_overrides_file() {
        let text = r#"api_key = "from-file""#;
        let config = Config::from_sources(
            Some(text),
            env(&[
                ("CINESEARCH_API_KEY", "from-env"),
                ("CINESEARCH_TRACE_LEVEL", "debug"),
                ("UNRELATED", "x"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_timeout_falls_back() {
        for raw in ["soon", "0", ""] {
            let config = Config::from_sources(None, env(&[("CINESEARCH_TIMEOUT_SECS", raw)])).unwrap();
            assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS, "input: {raw:?}");
        }
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = Config::from_sources(Some("api_key = "), Vec::new()).unwrap_err();
        assert!(matches!(err, CineSearchError::Config(_)));
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, CineSearchError::Config(_)));
    }

    #[test]
    fn unreadable_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, CineSearchError::Io(_)));
    }

    #[test]
    fn initialize_requires_api_key() {
        assert!(initialize(&Config::default()).is_err());
    }

    #[test]
    fn initialize_wires_store_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_key: Some("k".to_string()),
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let app = initialize(&config).unwrap();
        assert_eq!(app.favorites.store().path(), dir.path().join("store.json"));
        assert!(app.search.is_empty());
    }
}

//! Application layer: the state a presentation layer drives.
//!
//! This module sits between a presentation layer (the terminal shim in
//! `main.rs`, or any other front end) and the catalog/storage layers. It owns
//! no rendering logic and exposes plain data and plain operations.
//!
//! # Architecture
//!
//! ```text
//! Presentation ──► SearchSession ──► MovieCatalog ──► HTTP
//!        │
//!        ├───────► FavoritesStore ─► KeyValueStore ─► JSON file
//!        │
//!        └───────► load_details ───► MovieCatalog
//! ```
//!
//! Both stateful components are explicit owned values handed to the
//! presentation layer by reference; there is no global instance.
//!
//! # Modules
//!
//! - [`search`]: paginated search state with a single-fetch guard
//! - [`favorites`]: favorites set persisted through a key-value store
//! - [`details`]: one-shot detail lookup
//! - [`modes`]: lifecycle state enums

pub mod details;
pub mod favorites;
pub mod modes;
pub mod search;

pub use details::load_details;
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use modes::{FavoritesPhase, SessionPhase};
pub use search::{FetchOutcome, SearchSession, SkipReason};

//! Remote movie catalog access.
//!
//! # Modules
//!
//! - `client`: [`MovieCatalog`] trait and the [`CatalogPage`] search outcome
//! - `omdb`: `reqwest`-backed client for OMDb-style APIs
//! - `wire`: catalog JSON shapes, decoded into domain models

pub mod client;
pub mod omdb;
pub mod wire;

pub use client::{CatalogPage, MovieCatalog};
pub use omdb::OmdbClient;

//! Domain layer for cinesearch.
//!
//! This module contains the plain data the core hands to a presentation layer,
//! independent of the catalog's wire format or any storage backend.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie summary, detail and search page models
//!
//! # Examples
//!
//! ```
//! use cinesearch::domain::{MovieSummary, Result};
//!
//! fn pick() -> Result<MovieSummary> {
//!     Ok(MovieSummary::new("tt0372784", "Batman Begins", "2005", "N/A"))
//! }
//! ```

pub mod error;
pub mod movie;

pub use error::{CineSearchError, Result};
pub use movie::{MovieDetail, MovieSummary, Rating, SearchResultPage, POSTER_NOT_AVAILABLE};

//! Movie catalog abstraction.
//!
//! This module defines the [`MovieCatalog`] trait that abstracts over the
//! remote movie database. The search session and the detail loader only talk
//! to this trait, so tests can script responses without a network.
//!
//! The trait is declared with `#[async_trait(?Send)]`: everything runs on one
//! cooperative thread, and implementations are free to keep `Cell`/`RefCell`
//! state.

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::{MovieDetail, SearchResultPage};

/// Outcome of a successful search round trip.
///
/// The catalog answers a query with no hits using an explicit negative
/// response rather than an empty list. That answer is not an error and is
/// kept distinct from transport failures, which come back as
/// [`CineSearchError::RemoteFetch`](crate::CineSearchError::RemoteFetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPage {
    /// The catalog returned a page of results.
    Found(SearchResultPage),

    /// The catalog reported no results for the query.
    NoResults {
        /// Message supplied by the catalog, e.g. `"Movie not found!"`.
        message: String,
    },
}

/// Port to the remote movie database.
///
/// # Implementations
///
/// - [`OmdbClient`](crate::catalog::OmdbClient): HTTP client for OMDb-style APIs
#[async_trait(?Send)]
pub trait MovieCatalog {
    /// Fetches one page of search results for `query`.
    ///
    /// `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::RemoteFetch`](crate::CineSearchError::RemoteFetch)
    /// if the request fails or the response cannot be decoded.
    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage>;

    /// Fetches the full detail record for the title with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::RemoteFetch`](crate::CineSearchError::RemoteFetch)
    /// if the request fails, the response cannot be decoded, or the catalog
    /// does not know the id.
    async fn details(&self, id: &str) -> Result<MovieDetail>;
}


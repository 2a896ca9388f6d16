//! Movie domain models.
//!
//! This module defines [`MovieSummary`], the record shown in list views and
//! persisted as a favorite, [`MovieDetail`], the full record fetched for a
//! single title, and [`SearchResultPage`], one page of catalog search results.

use serde::{Deserialize, Serialize};

/// Poster value the catalog uses when it has no image for a title.
pub const POSTER_NOT_AVAILABLE: &str = "N/A";

/// Minimal movie record shown in list views.
///
/// Summaries are immutable once fetched and are identified by `id`, the
/// catalog's stable identifier (an IMDb id such as `tt0372784`).
///
/// The serialized form is the favorites blob format:
///
/// ```json
/// {"id": "tt1", "title": "X", "year": "2020", "posterUrl": "N/A"}
/// ```
///
/// The catalog's own field names (`imdbID`, `Title`, `Year`, `Poster`) are
/// accepted when reading so older favorites blobs still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    #[serde(alias = "imdbID")]
    pub id: String,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Year")]
    pub year: String,
    #[serde(alias = "Poster")]
    pub poster_url: String,
}

impl MovieSummary {
    /// Creates a new summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinesearch::domain::MovieSummary;
    ///
    /// let movie = MovieSummary::new("tt1", "X", "2020", "N/A");
    /// assert_eq!(movie.id, "tt1");
    /// assert!(movie.poster().is_none());
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster_url: poster_url.into(),
        }
    }

    /// Returns the poster URL, or `None` when the catalog has no poster.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        poster_or_none(&self.poster_url)
    }
}

/// A single (source, value) rating pair, e.g. `("Rotten Tomatoes", "84%")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full movie record shown in a detail view.
///
/// Fetched per title on demand and not cached beyond the current view.
/// `ratings` keeps the order the catalog returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub summary: MovieSummary,
    pub ratings: Vec<Rating>,
    pub plot: String,
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub runtime: String,
    pub content_rating: String,
    pub released: String,
    pub writer: String,
    pub language: String,
    pub country: String,
    pub awards: String,
}

impl MovieDetail {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// One-line metadata used under the title: `year • rating • runtime`.
    ///
    /// Fields the catalog reported as `N/A` or left empty are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinesearch::domain::{MovieDetail, MovieSummary};
    ///
    /// let detail = MovieDetail {
    ///     summary: MovieSummary::new("tt1", "X", "2020", "N/A"),
    ///     content_rating: "PG-13".into(),
    ///     runtime: "N/A".into(),
    ///     ..MovieDetail::empty()
    /// };
    /// assert_eq!(detail.meta_line(), "2020 • PG-13");
    /// ```
    #[must_use]
    pub fn meta_line(&self) -> String {
        [
            self.summary.year.as_str(),
            self.content_rating.as_str(),
            self.runtime.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty() && *part != POSTER_NOT_AVAILABLE)
        .collect::<Vec<_>>()
        .join(" • ")
    }

    /// A detail record with every field empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            summary: MovieSummary::new("", "", "", POSTER_NOT_AVAILABLE),
            ratings: Vec::new(),
            plot: String::new(),
            genre: String::new(),
            director: String::new(),
            actors: String::new(),
            runtime: String::new(),
            content_rating: String::new(),
            released: String::new(),
            writer: String::new(),
            language: String::new(),
            country: String::new(),
            awards: String::new(),
        }
    }
}

/// One page of search results for a query.
///
/// `total_available` is the catalog's total hit count for `query` and is only
/// meaningful for that query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub query: String,
    pub page: u32,
    pub items: Vec<MovieSummary>,
    pub total_available: usize,
}

fn poster_or_none(url: &str) -> Option<&str> {
    if url.is_empty() || url == POSTER_NOT_AVAILABLE {
        None
    } else {
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_in_favorites_format() {
        let movie = MovieSummary::new("tt1", "X", "2020", "N/A");
        let json = serde_json::to_string(&movie).unwrap();
        assert_eq!(
            json,
            r#"{"id":"tt1","title":"X","year":"2020","posterUrl":"N/A"}"#
        );
    }

    #[test]
    fn summary_accepts_catalog_field_names() {
        let json = r#"{"imdbID":"tt2","Title":"Y","Year":"1999","Poster":"http://img/y.jpg","Type":"movie"}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, "tt2");
        assert_eq!(movie.poster(), Some("http://img/y.jpg"));
    }

    #[test]
    fn meta_line_skips_missing_parts() {
        let detail = MovieDetail {
            summary: MovieSummary::new("tt1", "X", "2020", "N/A"),
            content_rating: String::new(),
            runtime: "140 min".into(),
            ..MovieDetail::empty()
        };
        assert_eq!(detail.meta_line(), "2020 • 140 min");
    }
}

//! Catalog wire models.
//!
//! Raw JSON shapes returned by the OMDb-style API. These are kept separate from
//! the domain models so the catalog's field naming (`imdbID`, `totalResults`,
//! `"True"`/`"False"` flags) never leaks past this module.

use serde::Deserialize;

use crate::catalog::client::CatalogPage;
use crate::domain::error::{CineSearchError, Result};
use crate::domain::{MovieDetail, MovieSummary, Rating, SearchResultPage, POSTER_NOT_AVAILABLE};

/// Value of the `Response` flag on a successful answer.
const RESPONSE_TRUE: &str = "True";

/// Message used when a negative answer carries no `Error` text.
const DEFAULT_NOT_FOUND: &str = "No results";

fn not_available() -> String {
    POSTER_NOT_AVAILABLE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    response: String,
    #[serde(default)]
    search: Vec<SummaryRecord>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryRecord {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default = "not_available")]
    poster: String,
}

impl From<SummaryRecord> for MovieSummary {
    fn from(record: SummaryRecord) -> Self {
        Self {
            id: record.imdb_id,
            title: record.title,
            year: record.year,
            poster_url: record.poster,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RatingRecord {
    source: String,
    value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct DetailResponse {
    response: String,
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    title: String,
    year: String,
    rated: String,
    released: String,
    runtime: String,
    genre: String,
    director: String,
    writer: String,
    actors: String,
    plot: String,
    language: String,
    country: String,
    awards: String,
    poster: String,
    ratings: Vec<RatingRecord>,
}

impl Default for DetailResponse {
    fn default() -> Self {
        Self {
            response: String::new(),
            error: None,
            imdb_id: String::new(),
            title: String::new(),
            year: String::new(),
            rated: String::new(),
            released: String::new(),
            runtime: String::new(),
            genre: String::new(),
            director: String::new(),
            writer: String::new(),
            actors: String::new(),
            plot: String::new(),
            language: String::new(),
            country: String::new(),
            awards: String::new(),
            poster: not_available(),
            ratings: Vec::new(),
        }
    }
}

impl From<DetailResponse> for MovieDetail {
    fn from(raw: DetailResponse) -> Self {
        Self {
            summary: MovieSummary {
                id: raw.imdb_id,
                title: raw.title,
                year: raw.year,
                poster_url: raw.poster,
            },
            ratings: raw
                .ratings
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            plot: raw.plot,
            genre: raw.genre,
            director: raw.director,
            actors: raw.actors,
            runtime: raw.runtime,
            content_rating: raw.rated,
            released: raw.released,
            writer: raw.writer,
            language: raw.language,
            country: raw.country,
            awards: raw.awards,
        }
    }
}

/// Decodes a search response body into a [`CatalogPage`].
///
/// A `"False"` response becomes [`CatalogPage::NoResults`]. A `"True"`
/// response must carry a decimal `totalResults`.
///
/// # Errors
///
/// Returns [`CineSearchError::RemoteFetch`] if the body is not valid JSON of
/// the expected shape or the total count is not a number.
pub fn parse_search(body: &str, query: &str, page: u32) -> Result<CatalogPage> {
    let raw: SearchResponse = serde_json::from_str(body)
        .map_err(|e| CineSearchError::RemoteFetch(format!("failed to parse search response: {e}")))?;

    if raw.response != RESPONSE_TRUE {
        let message = raw.error.unwrap_or_else(|| DEFAULT_NOT_FOUND.to_string());
        tracing::debug!(query = %query, page = page, message = %message, "catalog reported no results");
        return Ok(CatalogPage::NoResults { message });
    }

    let total_available = raw
        .total_results
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| CineSearchError::RemoteFetch("search response missing totalResults".to_string()))?
        .parse::<usize>()
        .map_err(|e| CineSearchError::RemoteFetch(format!("invalid totalResults: {e}")))?;

    let items: Vec<MovieSummary> = raw.search.into_iter().map(MovieSummary::from).collect();

    tracing::debug!(
        query = %query,
        page = page,
        item_count = items.len(),
        total_available = total_available,
        "decoded search page"
    );

    Ok(CatalogPage::Found(SearchResultPage {
        query: query.to_string(),
        page,
        items,
        total_available,
    }))
}

/// Decodes a detail response body into a [`MovieDetail`].
///
/// # Errors
///
/// Returns [`CineSearchError::RemoteFetch`] if the body cannot be decoded or
/// the catalog answered with `"False"` (unknown id, bad key).
pub fn parse_details(body: &str) -> Result<MovieDetail> {
    let raw: DetailResponse = serde_json::from_str(body)
        .map_err(|e| CineSearchError::RemoteFetch(format!("failed to parse detail response: {e}")))?;

    if raw.response != RESPONSE_TRUE {
        let message = raw.error.unwrap_or_else(|| DEFAULT_NOT_FOUND.to_string());
        return Err(CineSearchError::RemoteFetch(format!("catalog rejected detail request: {message}")));
    }

    Ok(MovieDetail::from(raw))
}

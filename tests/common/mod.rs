//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use async_trait::async_trait;
use cinesearch::catalog::CatalogPage;
use cinesearch::domain::{MovieDetail, MovieSummary, Rating, SearchResultPage};
use cinesearch::{CineSearchError, MovieCatalog, Result};

pub fn movie(id: &str, title: &str) -> MovieSummary {
    MovieSummary::new(id, title, "2005", "N/A")
}

/// In-process catalog: `n` titles per query, served `per_page` at a time.
pub struct FixtureCatalog {
    titles: HashMap<String, Vec<MovieSummary>>,
    per_page: usize,
    pub searches: Cell<usize>,
    pub fail_next: Cell<bool>,
}

impl FixtureCatalog {
    pub fn new(per_page: usize) -> Self {
        Self {
            titles: HashMap::new(),
            per_page,
            searches: Cell::new(0),
            fail_next: Cell::new(false),
        }
    }

    pub fn with_titles(mut self, query: &str, count: usize) -> Self {
        let movies = (1..=count)
            .map(|n| movie(&format!("{query}-{n}"), &format!("{query} {n}")))
            .collect();
        self.titles.insert(query.to_string(), movies);
        self
    }
}

#[async_trait(?Send)]
impl MovieCatalog for FixtureCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage> {
        self.searches.set(self.searches.get() + 1);
        tokio::task::yield_now().await;

        if self.fail_next.replace(false) {
            return Err(CineSearchError::RemoteFetch("connection reset".to_string()));
        }

        let Some(all) = self.titles.get(query) else {
            return Ok(CatalogPage::NoResults {
                message: "Movie not found!".to_string(),
            });
        };

        let start = (page as usize - 1) * self.per_page;
        let items: Vec<_> = all.iter().skip(start).take(self.per_page).cloned().collect();
        if items.is_empty() {
            return Ok(CatalogPage::NoResults {
                message: "Movie not found!".to_string(),
            });
        }

        Ok(CatalogPage::Found(SearchResultPage {
            query: query.to_string(),
            page,
            items,
            total_available: all.len(),
        }))
    }

    async fn details(&self, id: &str) -> Result<MovieDetail> {
        let summary = self
            .titles
            .values()
            .flatten()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CineSearchError::RemoteFetch("Incorrect IMDb ID.".to_string()))?;

        Ok(MovieDetail {
            summary,
            ratings: vec![Rating {
                source: "Internet Movie Database".to_string(),
                value: "8.2/10".to_string(),
            }],
            plot: "A plot.".to_string(),
            runtime: "140 min".to_string(),
            content_rating: "PG-13".to_string(),
            ..MovieDetail::empty()
        })
    }
}

//! Paginated search state.
//!
//! [`SearchSession`] owns the query text, the page counter, the accumulated
//! results and the total hit count for one search screen, and drives
//! incremental pagination against a [`MovieCatalog`].
//!
//! # Concurrency
//!
//! All methods take `&self`. State lives in a `RefCell` that is never borrowed
//! across an `.await`, so several operations on one session can be polled
//! concurrently on a single thread:
//!
//! - at most one fetch is in flight; `load_next_page` calls that arrive while
//!   one is outstanding are dropped
//! - every `run_search` bumps a generation counter, and responses tagged with
//!   an older generation are discarded when they arrive
//!
//! # Example
//!
//! ```no_run
//! use cinesearch::app::SearchSession;
//! use cinesearch::catalog::OmdbClient;
//! use std::time::Duration;
//!
//! # async fn demo() -> cinesearch::Result<()> {
//! let client = OmdbClient::new("https://www.omdbapi.com/", "KEY", Duration::from_secs(10))?;
//! let session = SearchSession::new(client);
//!
//! session.set_query("batman");
//! session.run_search().await;
//! session.load_next_page().await;
//! println!("{} of {}", session.len(), session.total_available());
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;

use tracing::Instrument;

use crate::app::modes::SessionPhase;
use crate::catalog::{CatalogPage, MovieCatalog};
use crate::domain::{MovieSummary, SearchResultPage};

/// Why a request did not reach the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The query is empty or whitespace-only.
    BlankQuery,
    /// Another fetch is already in flight.
    Busy,
    /// Every available result has already been accumulated.
    Exhausted,
}

/// What a search or page-advance call did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No request was sent.
    Skipped(SkipReason),

    /// The response arrived after a newer search and was discarded.
    Stale,

    /// Results were applied; `added` items were stored by this call.
    Applied {
        /// Number of items stored.
        added: usize,
    },

    /// The catalog reported no results.
    NoResults,

    /// The request failed; the message is also kept as `last_error`.
    Failed(String),
}

#[derive(Debug, Clone)]
struct SearchState {
    /// Text as last set by the user.
    query: String,

    /// Trimmed query that produced `items` and `total_available`.
    active_query: String,

    /// Last page applied to `items`.
    page: u32,

    items: Vec<MovieSummary>,
    total_available: usize,
    phase: SessionPhase,

    /// Bumped by every `run_search`.
    generation: u64,

    last_error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            active_query: String::new(),
            page: 1,
            items: Vec::new(),
            total_available: 0,
            phase: SessionPhase::Idle,
            generation: 0,
            last_error: None,
        }
    }
}

/// Returns the session to `Idle` if a fetch future is dropped before its
/// response is handled.
///
/// Only acts while the guarded generation is still current, so a newer
/// `run_search` keeps its own `Fetching` phase.
struct InFlight<'a> {
    state: &'a RefCell<SearchState>,
    generation: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        if state.generation == self.generation && state.phase == SessionPhase::Fetching {
            tracing::debug!(generation = self.generation, "fetch abandoned, session idle");
            state.phase = SessionPhase::Idle;
        }
    }
}

/// Search state for one results list.
#[derive(Debug)]
pub struct SearchSession<C> {
    catalog: C,
    state: RefCell<SearchState>,
}

impl<C: MovieCatalog> SearchSession<C> {
    /// Creates an idle session with an empty query.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            state: RefCell::new(SearchState::default()),
        }
    }

    /// The catalog this session searches.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Replaces the query text. Does not fetch.
    pub fn set_query(&self, text: impl Into<String>) {
        self.state.borrow_mut().query = text.into();
    }

    /// Runs a fresh search for the current query.
    ///
    /// Blank queries are ignored without touching any state. Otherwise the
    /// page counter resets to 1, page 1 is fetched, and the accumulated
    /// results are replaced by it. A "no results" answer or a failed request
    /// leaves the session with no results; a failure is also recorded in
    /// [`last_error`](Self::last_error).
    ///
    /// Any fetch still in flight from before this call is superseded and its
    /// response will be discarded.
    pub async fn run_search(&self) -> FetchOutcome {
        let (query, generation) = {
            let mut state = self.state.borrow_mut();
            let query = state.query.trim().to_string();
            if query.is_empty() {
                tracing::debug!("ignoring blank query");
                return FetchOutcome::Skipped(SkipReason::BlankQuery);
            }
            state.generation += 1;
            state.page = 1;
            state.phase = SessionPhase::Fetching;
            (query, state.generation)
        };

        let _in_flight = InFlight {
            state: &self.state,
            generation,
        };

        let span = tracing::debug_span!("run_search", query = %query, generation = generation);
        let result = self.catalog.search(&query, 1).instrument(span).await;

        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            tracing::debug!(query = %query, generation = generation, "discarding stale search response");
            return FetchOutcome::Stale;
        }

        state.phase = SessionPhase::Idle;
        state.active_query = query;

        match result {
            Ok(CatalogPage::Found(page)) => {
                let total = page.total_available;
                let mut items = page.items;
                items.truncate(total);
                let added = items.len();

                state.items = items;
                state.total_available = total;
                state.last_error = None;

                tracing::debug!(added = added, total_available = total, "search results replaced");
                FetchOutcome::Applied { added }
            }
            Ok(CatalogPage::NoResults { message }) => {
                state.items.clear();
                state.total_available = 0;
                state.last_error = None;

                tracing::debug!(message = %message, "search returned no results");
                FetchOutcome::NoResults
            }
            Err(e) => {
                state.items.clear();
                state.total_available = 0;
                state.last_error = Some(e.to_string());

                tracing::warn!(error = %e, "search failed");
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Fetches the next page for the current results and appends it.
    ///
    /// Does nothing if a fetch is already in flight or every available result
    /// has been accumulated. A failed request leaves the accumulated results
    /// and page counter untouched, so calling again retries the same page.
    pub async fn load_next_page(&self) -> FetchOutcome {
        let (query, page, generation) = {
            let mut state = self.state.borrow_mut();
            if state.phase == SessionPhase::Fetching {
                tracing::debug!("dropping page request, fetch in flight");
                return FetchOutcome::Skipped(SkipReason::Busy);
            }
            if state.items.len() >= state.total_available {
                tracing::trace!(
                    items = state.items.len(),
                    total_available = state.total_available,
                    "no more pages"
                );
                return FetchOutcome::Skipped(SkipReason::Exhausted);
            }
            state.phase = SessionPhase::Fetching;
            (state.active_query.clone(), state.page + 1, state.generation)
        };

        let _in_flight = InFlight {
            state: &self.state,
            generation,
        };

        let span = tracing::debug_span!("load_next_page", query = %query, page = page);
        let result = self.catalog.search(&query, page).instrument(span).await;

        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            tracing::debug!(query = %query, page = page, "discarding stale page response");
            return FetchOutcome::Stale;
        }

        state.phase = SessionPhase::Idle;

        match result {
            Ok(CatalogPage::Found(found)) => {
                let room = state.total_available.saturating_sub(state.items.len());
                let before = state.items.len();
                state.items.extend(found.items.into_iter().take(room));
                let added = state.items.len() - before;

                state.page = page;
                state.last_error = None;

                if added == 0 {
                    // The catalog ran dry before its own total.
                    state.total_available = state.items.len();
                }

                tracing::debug!(page = page, added = added, total = state.items.len(), "page appended");
                FetchOutcome::Applied { added }
            }
            Ok(CatalogPage::NoResults { message }) => {
                state.page = page;
                state.total_available = state.items.len();

                tracing::debug!(page = page, message = %message, "catalog has no further pages");
                FetchOutcome::NoResults
            }
            Err(e) => {
                state.last_error = Some(e.to_string());

                tracing::warn!(page = page, error = %e, "page load failed");
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Current query text, as last passed to [`set_query`](Self::set_query).
    #[must_use]
    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    /// Last page applied to the results (1 before any search).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.state.borrow().page
    }

    /// Copy of the accumulated results in display order.
    #[must_use]
    pub fn items(&self) -> Vec<MovieSummary> {
        self.state.borrow().items.clone()
    }

    /// The result at `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<MovieSummary> {
        self.state.borrow().items.get(index).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    /// Total hits the catalog reported for the active query.
    #[must_use]
    pub fn total_available(&self) -> usize {
        self.state.borrow().total_available
    }

    /// Whether another page can be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let state = self.state.borrow();
        state.items.len() < state.total_available
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    /// Message of the most recent failed request, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// The accumulated results as a single page record.
    #[must_use]
    pub fn snapshot(&self) -> SearchResultPage {
        let state = self.state.borrow();
        SearchResultPage {
            query: state.active_query.clone(),
            page: state.page,
            items: state.items.clone(),
            total_available: state.total_available,
        }
    }
}

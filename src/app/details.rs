//! On-demand detail lookup for a single title.

use tracing::Instrument;

use crate::catalog::MovieCatalog;
use crate::domain::MovieDetail;

/// Fetches the full record for `id`, or `None` if it could not be loaded.
///
/// Failures are logged and not retried. Nothing is cached; each detail view
/// fetches afresh.
pub async fn load_details<C: MovieCatalog + ?Sized>(catalog: &C, id: &str) -> Option<MovieDetail> {
    let span = tracing::debug_span!("load_details", id = %id);

    match catalog.details(id).instrument(span).await {
        Ok(detail) => {
            tracing::debug!(id = %id, ratings = detail.ratings.len(), "details loaded");
            Some(detail)
        }
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "failed to load details");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogPage;
    use crate::domain::error::{CineSearchError, Result};
    use crate::domain::MovieSummary;
    use async_trait::async_trait;

    struct OneTitle;

    #[async_trait(?Send)]
    impl MovieCatalog for OneTitle {
        async fn search(&self, _query: &str, _page: u32) -> Result<CatalogPage> {
            Ok(CatalogPage::NoResults {
                message: "unused".to_string(),
            })
        }

        async fn details(&self, id: &str) -> Result<MovieDetail> {
            if id == "tt1" {
                Ok(MovieDetail {
                    summary: MovieSummary::new("tt1", "X", "2020", "N/A"),
                    plot: "A plot.".to_string(),
                    ..MovieDetail::empty()
                })
            } else {
                Err(CineSearchError::RemoteFetch("Incorrect IMDb ID.".to_string()))
            }
        }
    }

    #[tokio::test]
    async fn known_id_loads() {
        let detail = load_details(&OneTitle, "tt1").await.unwrap();
        assert_eq!(detail.plot, "A plot.");
    }

    #[tokio::test]
    async fn failure_surfaces_as_none() {
        assert!(load_details(&OneTitle, "tt404").await.is_none());
    }
}

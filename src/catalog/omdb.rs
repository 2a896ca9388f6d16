//! HTTP catalog client for OMDb-style APIs.
//!
//! Every request is a GET against one fixed base URL with the API key and the
//! operation's parameters in the query string:
//!
//! ```text
//! search:  {base_url}?apikey=KEY&s=QUERY&page=N
//! details: {base_url}?apikey=KEY&i=ID&plot=full
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tracing::Instrument;

use crate::catalog::client::{CatalogPage, MovieCatalog};
use crate::catalog::wire;
use crate::domain::error::{CineSearchError, Result};
use crate::domain::MovieDetail;
use crate::Config;

/// Catalog client backed by `reqwest`.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Config`] if no API key is configured or the
    /// HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CineSearchError::Config("api_key is not set".to_string()))?;

        Self::new(&config.base_url, api_key, Duration::from_secs(config.timeout_secs))
    }

    /// Builds a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CineSearchError::Config`] if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CineSearchError::Config(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(base_url = %base_url, timeout_secs = timeout.as_secs(), "catalog client ready");

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.into(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET with the API key plus `params` and returns the body text.
    async fn get_text(&self, params: &[(&str, &str)]) -> Result<String> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| CineSearchError::RemoteFetch(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CineSearchError::RemoteFetch(format!("unexpected HTTP status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| CineSearchError::RemoteFetch(format!("failed to read response body: {e}")))
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl MovieCatalog for OmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage> {
        let span = tracing::debug_span!("omdb_search", query = %query, page = page);

        async {
            let page_param = page.to_string();
            let body = self.get_text(&[("s", query), ("page", page_param.as_str())]).await?;
            wire::parse_search(&body, query, page)
        }
        .instrument(span)
        .await
    }

    async fn details(&self, id: &str) -> Result<MovieDetail> {
        let span = tracing::debug_span!("omdb_details", id = %id);

        async {
            let body = self.get_text(&[("i", id), ("plot", "full")]).await?;
            wire::parse_details(&body)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_api_key() {
        let config = Config::default();
        let err = OmdbClient::from_config(&config).unwrap_err();
        assert!(matches!(err, CineSearchError::Config(_)));
    }

    #[test]
    fn from_config_rejects_blank_api_key() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(OmdbClient::from_config(&config).is_err());
    }

    #[test]
    fn from_config_uses_base_url() {
        let config = Config {
            api_key: Some("k3y".to_string()),
            base_url: "http://localhost:9/".to_string(),
            ..Config::default()
        };
        let client = OmdbClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/");
    }
}

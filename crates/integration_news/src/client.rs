//! Chronicling America HTTP client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::config::NewsConfig;
use crate::error::NewsError;
use crate::models::TitleSearchResults;

/// News client trait for searching newspaper titles
#[async_trait]
pub trait NewsClient: Send + Sync {
    /// Search newspaper titles matching `terms`, returning the given
    /// 1-based result page
    async fn search_titles(&self, terms: &str, page: u32)
    -> Result<TitleSearchResults, NewsError>;
}

/// Chronicling America HTTP client implementation
#[derive(Debug)]
pub struct ChroniclingAmericaClient {
    client: Client,
    config: NewsConfig,
}

impl ChroniclingAmericaClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: NewsConfig) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NewsError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, NewsError> {
        Self::new(NewsConfig::default())
    }

    /// Build the title search URL for the given terms and page
    ///
    /// Exposed so callers can stamp the exact request URL on a span.
    pub fn search_url(&self, terms: &str, page: u32) -> String {
        let encoded: String = form_urlencoded::byte_serialize(terms.as_bytes()).collect();
        format!(
            "{}/search/titles/results/?terms={}&format=json&page={}",
            self.config.base_url, encoded, page
        )
    }
}

#[async_trait]
impl NewsClient for ChroniclingAmericaClient {
    #[instrument(skip(self), fields(page = %page))]
    async fn search_titles(
        &self,
        terms: &str,
        page: u32,
    ) -> Result<TitleSearchResults, NewsError> {
        if terms.trim().is_empty() {
            return Err(NewsError::InvalidTerms(
                "search terms must not be empty".to_string(),
            ));
        }

        let url = self.search_url(terms, page);
        debug!(url = %url, "Searching newspaper titles");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NewsError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(NewsError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(NewsError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json::<TitleSearchResults>()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))
    }
}

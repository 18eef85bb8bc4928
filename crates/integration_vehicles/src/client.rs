//! NHTSA vPIC HTTP client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::ManufacturerList;

/// Errors that can occur when talking to the vPIC API
#[derive(Debug, thiserror::Error)]
pub enum VehiclesError {
    /// Failed to initialize the HTTP client
    #[error("Failed to connect to vPIC API: {0}")]
    ConnectionFailed(String),

    /// The HTTP request failed or returned a non-success status
    #[error("vPIC request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be parsed
    #[error("Failed to parse vPIC response: {0}")]
    ParseError(String),

    /// The service reported a server-side failure
    #[error("vPIC service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Configuration for the vPIC client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclesConfig {
    /// Base URL of the vPIC API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://vpic.nhtsa.dot.gov/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for VehiclesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Vehicles client trait for listing manufacturers
#[async_trait]
pub trait VehiclesClient: Send + Sync {
    /// Fetch the manufacturer list, optionally requesting a specific
    /// 1-based page
    async fn list_manufacturers(&self, page: Option<u32>)
    -> Result<ManufacturerList, VehiclesError>;
}

/// vPIC HTTP client implementation
#[derive(Debug)]
pub struct VpicClient {
    client: Client,
    config: VehiclesConfig,
}

impl VpicClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: VehiclesConfig) -> Result<Self, VehiclesError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VehiclesError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, VehiclesError> {
        Self::new(VehiclesConfig::default())
    }

    /// Build the manufacturer listing URL
    ///
    /// Exposed so callers can stamp the exact request URL on a span.
    pub fn manufacturers_url(&self, page: Option<u32>) -> String {
        let base = format!(
            "{}/vehicles/getallmanufacturers?format=json",
            self.config.base_url
        );
        match page {
            Some(page) => format!("{base}&page={page}"),
            None => base,
        }
    }
}

#[async_trait]
impl VehiclesClient for VpicClient {
    #[instrument(skip(self))]
    async fn list_manufacturers(
        &self,
        page: Option<u32>,
    ) -> Result<ManufacturerList, VehiclesError> {
        let url = self.manufacturers_url(page);
        debug!(url = %url, "Fetching vehicle manufacturers");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VehiclesError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(VehiclesError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(VehiclesError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json::<ManufacturerList>()
            .await
            .map_err(|e| VehiclesError::ParseError(e.to_string()))
    }
}

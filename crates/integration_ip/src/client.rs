//! ipify HTTP client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Errors that can occur when resolving the public IP
#[derive(Debug, thiserror::Error)]
pub enum IpError {
    /// Failed to initialize the HTTP client
    #[error("Failed to connect to ipify: {0}")]
    ConnectionFailed(String),

    /// The HTTP request failed or returned a non-success status
    #[error("ipify request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be parsed
    #[error("Failed to parse ipify response: {0}")]
    ParseError(String),
}

/// Configuration for the ipify client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpConfig {
    /// Base URL of the ipify API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.ipify.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for IpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Public IP address payload returned by ipify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIp {
    /// The caller's public IP address
    pub ip: String,
}

/// IP client trait for resolving the caller's public address
#[async_trait]
pub trait IpClient: Send + Sync {
    /// Fetch the caller's current public IP address
    async fn current_ip(&self) -> Result<PublicIp, IpError>;
}

/// ipify HTTP client implementation
#[derive(Debug)]
pub struct IpifyClient {
    client: Client,
    config: IpConfig,
}

impl IpifyClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: IpConfig) -> Result<Self, IpError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IpError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, IpError> {
        Self::new(IpConfig::default())
    }

    /// Build the IP lookup URL
    ///
    /// Exposed so callers can stamp the exact request URL on a span.
    pub fn ip_url(&self) -> String {
        format!("{}/?format=json", self.config.base_url)
    }
}

#[async_trait]
impl IpClient for IpifyClient {
    #[instrument(skip(self))]
    async fn current_ip(&self) -> Result<PublicIp, IpError> {
        let url = self.ip_url();
        debug!(url = %url, "Resolving public IP address");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IpError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json::<PublicIp>()
            .await
            .map_err(|e| IpError::ParseError(e.to_string()))
    }
}

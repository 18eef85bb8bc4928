//! News search error types

use thiserror::Error;

/// Errors that can occur during news search operations
#[derive(Debug, Error)]
pub enum NewsError {
    /// Connection to the search service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the search service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the search service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Search terms are empty or invalid
    #[error("Invalid search terms: {0}")]
    InvalidTerms(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

//! HTTP transport error types

use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Transport-level failures
///
/// A response with a non-success status is not an error at this layer; it is
/// returned to the caller as a `StatusCode`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed (connection refused, DNS, TLS, malformed response)
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Could not connect to the remote host
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Check if the failure was caused by a timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_timeout(),
            HttpError::Timeout(_) => true,
            _ => false,
        }
    }
}

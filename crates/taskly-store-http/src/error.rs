//! Error types for HTTP record-store operations.

use thiserror::Error;

/// Errors that can occur during `HttpStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level failure talking to the backend.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Unexpected status {status} from {endpoint}")]
    Status {
        /// HTTP status returned by the backend.
        status: reqwest::StatusCode,
        /// Endpoint that produced the response.
        endpoint: String,
    },

    /// The configured base URL is not a valid URL.
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments.
    #[error("Base URL cannot carry path segments")]
    BaseUrl,
}

impl StoreError {
    /// Whether the failure means the backend is unreachable, as opposed to
    /// an application-level rejection. Only unreachable backends trigger the
    /// local mock fallback.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_connect() || err.is_timeout())
    }
}

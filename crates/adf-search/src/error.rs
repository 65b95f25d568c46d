//! Error types for link search

use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while fetching a results page
#[derive(Error, Debug)]
pub enum SearchError {
    /// Connection, DNS or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Endpoint could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configured CSS selector does not parse
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Timeout error
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    /// Results page larger than the configured cap
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl SearchError {
    /// Convert a reqwest failure, recording the configured timeout
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        // the request URL carries the query text
        let err = err.without_url();
        if err.is_timeout() {
            SearchError::Timeout(timeout_secs)
        } else if let Some(status) = err.status() {
            SearchError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            SearchError::Network(err.to_string())
        }
    }

    /// Whether another attempt might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Network(_) | SearchError::Timeout(_) => true,
            SearchError::Http { status, .. } => *status == 429 || *status >= 500,
            SearchError::InvalidUrl(_)
            | SearchError::InvalidSelector { .. }
            | SearchError::BodyTooLarge { .. }
            | SearchError::Client(_) => false,
        }
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::InvalidUrl(err.to_string())
    }
}

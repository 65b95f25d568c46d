//! Error types for solution generation

use thiserror::Error;

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;

/// Chat completion failures.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Configuration error (bad endpoint, client could not be built)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials were rejected (401/403)
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Deployment or endpoint path does not exist (404)
    #[error("Deployment not found: {0}")]
    DeploymentNotFound(String),

    /// Rate limit exceeded (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Request timed out
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    /// Connection failed or body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Service-side failure (5xx)
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Request refused for its content (other 4xx, e.g. content filter)
    #[error("Request rejected {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The model returned no usable text
    #[error("Completion was empty")]
    EmptyCompletion,
}

/// How a failure should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operator must fix credentials or settings; retrying is pointless
    Configuration,
    /// May succeed on another attempt
    Transient,
    /// The model could not produce an answer for this input
    Model,
}

impl SolveError {
    /// Classify an HTTP error status
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => SolveError::Unauthorized { status, message },
            404 => SolveError::DeploymentNotFound(message),
            429 => SolveError::RateLimited(message),
            s if s >= 500 => SolveError::Upstream { status, message },
            _ => SolveError::Rejected { status, message },
        }
    }

    /// Convert a reqwest failure, recording the configured timeout
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            SolveError::Timeout(timeout_secs)
        } else if err.is_builder() {
            SolveError::Config(err.to_string())
        } else if err.is_decode() {
            SolveError::MalformedResponse(err.to_string())
        } else {
            SolveError::Network(err.to_string())
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SolveError::Config(_)
            | SolveError::Unauthorized { .. }
            | SolveError::DeploymentNotFound(_) => FailureKind::Configuration,
            SolveError::RateLimited(_)
            | SolveError::Timeout(_)
            | SolveError::Network(_)
            | SolveError::Upstream { .. } => FailureKind::Transient,
            SolveError::Rejected { .. }
            | SolveError::MalformedResponse(_)
            | SolveError::EmptyCompletion => FailureKind::Model,
        }
    }

    /// Whether another attempt might succeed
    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::Transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            SolveError::from_status(401, String::new()).kind(),
            FailureKind::Configuration
        );
        assert_eq!(
            SolveError::from_status(404, String::new()).kind(),
            FailureKind::Configuration
        );
        assert_eq!(
            SolveError::from_status(429, String::new()).kind(),
            FailureKind::Transient
        );
        assert_eq!(
            SolveError::from_status(502, String::new()).kind(),
            FailureKind::Transient
        );
        assert_eq!(
            SolveError::from_status(400, String::new()).kind(),
            FailureKind::Model
        );
    }

    #[test]
    fn test_only_transient_is_retryable() {
        assert!(SolveError::Timeout(30).is_retryable());
        assert!(!SolveError::EmptyCompletion.is_retryable());
        assert!(!SolveError::Config("x".into()).is_retryable());
    }
}

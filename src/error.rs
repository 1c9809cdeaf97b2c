//! Error types for the tianxing sensors
//!
//! Fetch failures are classified here but are fully absorbed at the fetcher
//! boundary: nothing above the fetcher ever sees an error value, only the
//! absence of data, surfaced as degraded states at the sensor boundary.
//! `fetch_raw` keeps the full taxonomy observable for callers that want it.

use thiserror::Error;

/// Errors that can occur during provider fetch operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Non-success HTTP status from the transport
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Provider rate limit exceeded (code 130)
    #[error("Provider rate limit exceeded")]
    RateLimit,

    /// Invalid API key (code 100)
    #[error("Invalid API key: {0}")]
    InvalidKey(String),

    /// Any other provider-level error code
    #[error("Provider error [{code}]: {msg}")]
    Provider { code: i64, msg: String },

    /// Malformed response body
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Check if this error is transient (worth trying again next cycle)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout | Self::ServerError(_) | Self::RateLimit => true,
            Self::InvalidKey(_) | Self::Provider { .. } | Self::Decode(_) | Self::InvalidUrl(_) => {
                false
            }
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Timeout | Self::ServerError(_) => ErrorCategory::Network,
            Self::RateLimit | Self::Provider { .. } => ErrorCategory::Provider,
            Self::Decode(_) => ErrorCategory::Parsing,
            Self::InvalidKey(_) | Self::InvalidUrl(_) => ErrorCategory::Config,
        }
    }
}

/// Classification of errors for logging and handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport-level errors
    Network,
    /// Provider-level error codes
    Provider,
    /// Parsing and decoding errors
    Parsing,
    /// Configuration and validation errors
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_recoverable() {
        assert!(FetchError::Timeout.is_recoverable());
        assert!(FetchError::RateLimit.is_recoverable());
        assert!(FetchError::ServerError(503).is_recoverable());
        assert!(!FetchError::InvalidKey("bad key".into()).is_recoverable());
        assert!(!FetchError::Provider {
            code: 250,
            msg: "数据返回为空".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(FetchError::Timeout.category(), ErrorCategory::Network);
        assert_eq!(FetchError::RateLimit.category(), ErrorCategory::Provider);
        assert_eq!(
            FetchError::Decode("not json".into()).category(),
            ErrorCategory::Parsing
        );
        assert_eq!(
            FetchError::InvalidKey("bad key".into()).category(),
            ErrorCategory::Config
        );
    }
}

//! Error types for data source operations.

use thiserror::Error;

/// Errors that can occur while talking to the ticker API.
///
/// A failed fetch skips the affected pair for the round without mutating its
/// baseline; the error never aborts the round on its own.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    ConnectionFailed(String),

    #[error("ticker API returned HTTP {0}")]
    HttpStatus(u16),

    #[error("failed to parse response: {0}")]
    ParseError(String),

    #[error("request timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else if err.is_decode() {
            FeedError::ParseError(err.to_string())
        } else {
            FeedError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

impl FeedError {
    /// Returns true if this error is likely to succeed on a later round.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FeedError::ConnectionFailed(_) | FeedError::HttpStatus(_) | FeedError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FeedError::ConnectionFailed("refused".into()).is_transient());
        assert!(FeedError::HttpStatus(503).is_transient());
        assert!(FeedError::Timeout("10s".into()).is_transient());
        assert!(!FeedError::ParseError("bad json".into()).is_transient());
    }
}

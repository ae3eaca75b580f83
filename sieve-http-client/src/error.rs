//! HTTP client error types.

use std::time::Duration;
use thiserror::Error;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Could not connect to the remote host.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be assembled (bad header, body encoding).
    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// Non-success status, produced by [`Response::error_for_status`](crate::Response::error_for_status).
    #[error("Response error: {status} - {message}")]
    Response { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl HttpClientError {
    /// Transport-level failure where no usable response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_) | Self::Http(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_)) || matches!(self, Self::Http(e) if e.is_timeout())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_)) || matches!(self, Self::Http(e) if e.is_connect())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(HttpClientError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(HttpClientError::Connection("refused".into()).is_connection());
        assert!(HttpClientError::Connection("refused".into()).is_transport());
        assert!(!HttpClientError::Json("eof".into()).is_transport());
    }

    #[test]
    fn test_status_code() {
        let err = HttpClientError::Response {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.to_string(), "Response error: 503 - down");
        assert_eq!(HttpClientError::InvalidUrl("x".into()).status_code(), None);
    }
}

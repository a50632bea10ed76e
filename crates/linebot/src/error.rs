//! Client error types.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration (missing credentials, unusable token).
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint base parsed but is not usable as an absolute API root.
    #[error("Invalid endpoint base '{url}': {reason}")]
    InvalidEndpointBase {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A templated endpoint was given an identifier that cannot stand as
    /// one path segment.
    #[error("Invalid endpoint identifier '{0}'")]
    InvalidEndpoint(String),

    /// HTTP transport failed (network, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request was cancelled through its request context.
    #[error("Request cancelled")]
    Cancelled,

    /// The request did not complete within the context's timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
        /// Per-property details, if any.
        details: Vec<ErrorDetail>,
    },

    /// Authentication failed (invalid or expired channel access token).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_)) || matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_)) || matches!(self, Error::Api { status: 401, .. })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }

    /// Check if the request was cancelled or timed out by its context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled | Error::Timeout(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the Messaging API.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

/// A single entry of an API error's `details` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// What was wrong.
    pub message: String,
    /// The request property the message refers to.
    #[serde(default)]
    pub property: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Error::NotFound("x".into()).is_not_found());
        assert!(
            Error::Api {
                status: 404,
                message: "gone".into(),
                details: vec![],
            }
            .is_not_found()
        );
        assert!(Error::Auth("bad token".into()).is_auth_error());
        assert!(
            Error::Api {
                status: 429,
                message: "slow down".into(),
                details: vec![],
            }
            .is_rate_limited()
        );
        assert!(
            Error::Api {
                status: 503,
                message: "down".into(),
                details: vec![],
            }
            .is_server_error()
        );
        assert!(Error::Cancelled.is_cancelled());
        assert!(Error::Timeout(Duration::from_secs(1)).is_cancelled());
        assert!(!Error::Config("x".into()).is_cancelled());
    }

    #[test]
    fn test_error_response_details_default_to_empty() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message":"The request body has 1 error(s)"}"#).unwrap();
        assert_eq!(body.message, "The request body has 1 error(s)");
        assert!(body.details.is_empty());

        let body: ErrorResponse = serde_json::from_str(
            r#"{"message":"bad","details":[{"message":"May not be empty","property":"messages[0].text"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.details,
            vec![ErrorDetail {
                message: "May not be empty".into(),
                property: Some("messages[0].text".into()),
            }]
        );
    }
}

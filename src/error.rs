//! Error types for twitter-pager
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The pager decides between retrying and giving up with [`Error::is_transient`].

use thiserror::Error;

/// The main error type for twitter-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Request failed with HTTP {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Twitter service error {code}: {message}")]
    ServiceError { code: i64, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded {
        max_retries: u32,
        /// Failure behind the last retry; `None` when the pages stopped advancing
        #[source]
        last_error: Option<Box<Error>>,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth {
        /// Status of the token endpoint response, if one was received
        status: Option<u16>,
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a request error from an HTTP status
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Create an in-band service error
    pub fn service(code: i64, message: impl Into<String>) -> Self {
        Self::ServiceError {
            code,
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            status: None,
            message: message.into(),
        }
    }

    /// Create an auth error from a failed token endpoint response
    pub fn auth_status(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a max retries error
    pub fn max_retries(max_retries: u32, last_error: Option<Error>) -> Self {
        Self::MaxRetriesExceeded {
            max_retries,
            last_error: last_error.map(Box::new),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Auth { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if re-issuing the same request may succeed.
    ///
    /// Server-side statuses (>= 500), in-band service errors and dropped
    /// connections are transient. Client-side statuses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Request { status, .. } => is_server_status(*status),
            Error::Auth { status, .. } => status.is_some_and(is_server_status),
            Error::ServiceError { .. } => true,
            Error::Http(e) => match e.status() {
                Some(status) => is_server_status(status.as_u16()),
                None => e.is_connect() || e.is_timeout() || e.is_request() || e.is_body(),
            },
            _ => false,
        }
    }
}

fn is_server_status(status: u16) -> bool {
    status >= 500
}

/// Result type alias for twitter-pager
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::request(404, "Sorry, that page does not exist");
        assert_eq!(
            err.to_string(),
            "Request failed with HTTP 404: Sorry, that page does not exist"
        );

        let err = Error::service(130, "Over capacity");
        assert_eq!(err.to_string(), "Twitter service error 130: Over capacity");
    }

    #[test_case(400, false ; "bad request")]
    #[test_case(401, false ; "unauthorized")]
    #[test_case(404, false ; "not found")]
    #[test_case(429, false ; "rate limited")]
    #[test_case(499, false ; "upper client range")]
    #[test_case(500, true ; "internal error")]
    #[test_case(503, true ; "over capacity")]
    #[test_case(504, true ; "gateway timeout")]
    fn test_request_error_is_transient(status: u16, expected: bool) {
        assert_eq!(Error::request(status, "").is_transient(), expected);
    }

    #[test]
    fn test_other_errors_are_fatal() {
        assert!(Error::service(131, "Internal error").is_transient());
        assert!(!Error::config("bad").is_transient());
        assert!(!Error::auth("bad").is_transient());
        assert!(!Error::max_retries(3, None).is_transient());
    }

    #[test_case(Error::auth_status(503, "Over capacity"), true ; "token endpoint unavailable")]
    #[test_case(Error::auth_status(500, ""), true ; "token endpoint internal error")]
    #[test_case(Error::auth_status(403, "Unable to verify your credentials"), false ; "bad credentials")]
    #[test_case(Error::auth("Unexpected token type 'mac'"), false ; "no status")]
    fn test_auth_error_is_transient(err: Error, expected: bool) {
        assert_eq!(err.is_transient(), expected);
    }

    #[test]
    fn test_max_retries_keeps_last_error() {
        use std::error::Error as _;

        let err = Error::max_retries(2, Some(Error::service(130, "Over capacity")));
        assert_eq!(err.to_string(), "Max retries (2) exceeded");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Twitter service error 130: Over capacity"));

        assert!(Error::max_retries(2, None).source().is_none());
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::request(401, "").status(), Some(401));
        assert_eq!(Error::service(130, "").status(), None);
        assert_eq!(Error::auth_status(503, "").status(), Some(503));
        assert_eq!(Error::auth("").status(), None);
    }
}

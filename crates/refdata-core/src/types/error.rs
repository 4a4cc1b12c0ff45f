//! Error types and handling for the reference data services
//!
//! Request-scoped errors map onto an HTTP status with a plain-text message at
//! the endpoint boundary; startup and import errors end the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::log_error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the reference data services
#[derive(Error, Debug)]
pub enum Error {
    /// A path parameter is not a well-formed entity reference
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A request body could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A lookup or write against the document store failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The upstream reference source could not be reached or decoded
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Missing or invalid configuration at startup
    #[error("Configuration error: {0}")]
    ConfigurationFatal(String),
}

/// Document store failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed an operation
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend could not be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// A stored document did not match the expected shape
    #[error("malformed document in '{collection}': {source}")]
    Decode {
        /// Collection the document was read from
        collection: String,
        /// Underlying decode failure
        source: serde_json::Error,
    },

    /// A document could not be encoded for storage
    #[error("cannot encode document: {0}")]
    Encode(String),
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl Error {
    /// Create an invalid identifier error
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigurationFatal(msg.into())
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidIdentifier(_) | Error::InvalidInput(_))
    }

    /// HTTP status this error surfaces as
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidIdentifier(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Error::StoreUnavailable(_) | Error::ConfigurationFatal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side details stay in the log
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            log_error!("Request failed: {}", self);
            match self {
                Error::UpstreamUnavailable(_) => "upstream unavailable".to_string(),
                _ => "internal server error".to_string(),
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let err = Error::invalid_identifier("abc");
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = Error::invalid_input("expected an array of strings");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_map_to_generic_server_error() {
        let err: Error = StoreError::Backend("socket closed".into()).into();
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        assert_eq!(Error::upstream("timeout").status_code(), StatusCode::BAD_GATEWAY);
    }
}

//! Error types for request execution.
//!
//! # Error Handling
//!
//! - [`TransportError`]: the request never produced a response (network, DNS,
//!   TLS, timeout, body read). Never retried.
//! - [`InvalidHttpRequestError`]: the request could not be built.
//! - [`ResponseError`]: the shop answered with a failure, or with a body that
//!   could not be decoded.
//! - [`PaginationError`]: the `Link` header of a successful response was
//!   malformed.
//! - [`HttpError`]: the umbrella type returned by every client call.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{HttpError, ResponseError};
//!
//! match client.get::<serde_json::Value, _>("products.json", &()).await {
//!     Ok(body) => println!("{body}"),
//!     Err(HttpError::Response(ResponseError::RateLimited { retry_after_seconds, .. })) => {
//!         println!("still throttled, retry in {retry_after_seconds}s");
//!     }
//!     Err(err) => println!("request failed: {err}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::pagination::PaginationError;
use crate::clients::response_error::ResponseError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure below the HTTP layer: no response was received.
///
/// Custom [`Transport`](crate::Transport) implementations build these with
/// [`TransportError::new`] or [`TransportError::with_source`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    /// Creates a transport error with a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            format!("network error: {err}")
        };
        Self::with_source(message, err)
    }
}

/// Error returned when a request cannot be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not a supported verb.
    #[error("Invalid HTTP method: '{method}'")]
    InvalidMethod {
        /// The rejected method.
        method: String,
    },

    /// The relative path could not be parsed or resolved into a URL.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath {
        /// The rejected path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {message}")]
    InvalidBody {
        /// The serializer's message.
        message: String,
    },

    /// The query options could not be flattened into a query string.
    #[error("Failed to encode query options: {message}")]
    InvalidOptions {
        /// Why the options were rejected.
        message: String,
    },

    /// An update was requested for a resource that has no ID.
    #[error("Cannot update {resource} without an ID")]
    MissingResourceId {
        /// The resource name, e.g. `product`.
        resource: &'static str,
    },
}

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The API answered with a failure or an undecodable body.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The pagination `Link` header was malformed.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}

impl HttpError {
    /// Returns the API response error, if this is one.
    #[must_use]
    pub const fn as_response_error(&self) -> Option<&ResponseError> {
        match self {
            Self::Response(err) => Some(err),
            _ => None,
        }
    }
}

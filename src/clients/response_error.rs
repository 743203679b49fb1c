//! Classification of failed API responses.
//!
//! Shopify reports failures in several body shapes:
//!
//! ```text
//! {"error": "Not Found"}
//! {"errors": "Not Found"}
//! {"errors": ["Title can't be blank", "Vendor is too long"]}
//! {"errors": {"title": ["can't be blank"], "base": "invalid"}}
//! ```
//!
//! [`classify`] folds every shape into exactly one [`ResponseError`]. A body
//! that is not JSON becomes [`ResponseError::DecodingFailed`].

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::rate_limit::retry_after_seconds;

/// A failed API call, classified from the response status and body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResponseError {
    /// Any non-2xx response other than 429.
    #[error("{}", render_message(.message, .errors))]
    Generic {
        /// HTTP status code.
        status: u16,
        /// Primary human-readable message, possibly empty.
        message: String,
        /// Every individual error reported by the API, in order.
        errors: Vec<String>,
    },

    /// A 429 response. Retryable after `retry_after_seconds`.
    #[error("{}", render_message(.message, .errors))]
    RateLimited {
        /// HTTP status code (always 429).
        status: u16,
        /// Primary human-readable message, possibly empty.
        message: String,
        /// Every individual error reported by the API, in order.
        errors: Vec<String>,
        /// Backoff requested by the `Retry-After` header, zero when absent.
        retry_after_seconds: f64,
    },

    /// The body could not be decoded as JSON.
    #[error("{message}")]
    DecodingFailed {
        /// HTTP status code, which may be a success status.
        status: u16,
        /// The raw response body.
        body: Vec<u8>,
        /// The decoder's message.
        message: String,
    },
}

impl ResponseError {
    /// Returns the HTTP status code of the failed response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Generic { status, .. }
            | Self::RateLimited { status, .. }
            | Self::DecodingFailed { status, .. } => *status,
        }
    }

    /// Returns the primary message as reported (not the rendered fallback).
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Generic { message, .. }
            | Self::RateLimited { message, .. }
            | Self::DecodingFailed { message, .. } => message,
        }
    }

    /// Returns the individual errors reported by the API.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Generic { errors, .. } | Self::RateLimited { errors, .. } => errors,
            Self::DecodingFailed { .. } => &[],
        }
    }

    /// Returns the server-requested backoff for rate-limited responses.
    #[must_use]
    pub const fn retry_after_seconds(&self) -> Option<f64> {
        match self {
            Self::RateLimited {
                retry_after_seconds,
                ..
            } => Some(*retry_after_seconds),
            _ => None,
        }
    }

    /// Builds the decoding error for a body that failed to parse.
    pub(crate) fn decoding_failed(status: u16, body: &[u8], err: &serde_json::Error) -> Self {
        Self::DecodingFailed {
            status,
            body: body.to_vec(),
            message: err.to_string(),
        }
    }
}

/// The rendered message: the primary message, else the sorted error list,
/// else `"Unknown Error"`.
fn render_message(message: &str, errors: &[String]) -> String {
    if !message.is_empty() {
        return message.to_string();
    }
    if errors.is_empty() {
        return "Unknown Error".to_string();
    }
    let mut sorted = errors.to_vec();
    sorted.sort();
    sorted.join(", ")
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<ErrorsField>,
}

/// The polymorphic `errors` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorsField {
    Message(String),
    List(Vec<Value>),
    Fields(Map<String, Value>),
    // Numbers and booleans carry nothing usable.
    Other(Value),
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns `Ok(())` for statuses in `[200, 300)`, otherwise the classified error.
///
/// # Errors
///
/// Returns the [`ResponseError`] produced by [`classify`] for non-2xx statuses.
pub fn check_response(status: u16, headers: &HeaderMap, body: &[u8]) -> Result<(), ResponseError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(classify(status, headers, body))
}

/// Classifies a non-2xx response into exactly one [`ResponseError`].
///
/// A body that is not JSON yields [`ResponseError::DecodingFailed`] whatever the
/// status. Otherwise a 406 carries the standard reason phrase as its message
/// and a 429 becomes [`ResponseError::RateLimited`] with the
/// `Retry-After` value.
#[must_use]
pub fn classify(status: u16, headers: &HeaderMap, body: &[u8]) -> ResponseError {
    let parsed = if body.is_empty() {
        Ok(ErrorBody::default())
    } else {
        serde_json::from_slice::<ErrorBody>(body)
    };

    let (mut message, errors) = match parsed {
        Ok(error_body) => interpret(error_body),
        Err(err) => return ResponseError::decoding_failed(status, body, &err),
    };

    if status == StatusCode::NOT_ACCEPTABLE.as_u16() {
        message = StatusCode::NOT_ACCEPTABLE
            .canonical_reason()
            .unwrap_or_default()
            .to_string();
    }

    if status == StatusCode::TOO_MANY_REQUESTS.as_u16() {
        return ResponseError::RateLimited {
            status,
            message,
            errors,
            retry_after_seconds: retry_after_seconds(headers),
        };
    }

    ResponseError::Generic {
        status,
        message,
        errors,
    }
}

fn interpret(body: ErrorBody) -> (String, Vec<String>) {
    let mut message = body.error.unwrap_or_default();
    let mut errors = Vec::new();

    match body.errors {
        None | Some(ErrorsField::Other(_)) => {}
        Some(ErrorsField::Message(text)) => message = text,
        Some(ErrorsField::List(items)) => {
            errors = items.iter().map(stringify).collect();
            if message.is_empty() {
                message = errors.join(", ");
            }
        }
        Some(ErrorsField::Fields(fields)) => {
            for (key, value) in &fields {
                match value {
                    Value::String(text) => errors.push(format!("{key}: {text}")),
                    Value::Array(items) => {
                        errors.extend(items.iter().map(|item| format!("{key}: {}", stringify(item))));
                    }
                    _ => {}
                }
            }
            if message.is_empty() {
                if let Some(first) = errors.first() {
                    message = first.clone();
                }
            }
        }
    }

    (message, errors)
}

//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails at construction time rather than on the first
//! request.
//!
//! # Example
//!
//! ```rust
//! use shopify_rest::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide a valid Shopify API secret key.")]
    EmptyApiSecretKey,

    /// App password cannot be empty.
    #[error("App password cannot be empty. Please provide the private app password.")]
    EmptyAppPassword,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL override is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'http://127.0.0.1:8080').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A credential contains characters that cannot be sent in an HTTP header.
    #[error("Invalid {field}: the value contains characters that are not allowed in an HTTP header.")]
    InvalidCredential {
        /// The credential that was rejected.
        field: &'static str,
    },

    /// The default HTTP transport could not be created.
    #[error("Failed to create HTTP transport: {reason}")]
    TransportInit {
        /// The underlying failure.
        reason: String,
    },
}

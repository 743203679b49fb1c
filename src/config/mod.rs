//! Configuration types for the Shopify REST client.
//!
//! # Overview
//!
//! - [`ShopifyConfig`]: app-level credentials and the default API version,
//!   shared by every client created for that app
//! - [`ShopifyConfigBuilder`]: a builder for [`ShopifyConfig`]
//! - [`ApiKey`], [`ApiSecretKey`], [`AppPassword`]: validated credential newtypes
//! - [`ShopDomain`]: a normalized `*.myshopify.com` shop domain
//! - [`ApiVersion`]: the Shopify API version, which selects the path prefix
//!
//! Per-shop settings (access token, retry budget, transport, logger) live on
//! [`ClientBuilder`](crate::ClientBuilder).
//!
//! # Example
//!
//! ```rust
//! use shopify_rest::{ShopifyConfig, ApiKey, AppPassword, ApiVersion};
//!
//! let config = ShopifyConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .password(AppPassword::new("private-app-password").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.password().is_some());
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiSecretKey, AppPassword, ShopDomain};
pub use version::{path_prefix_for, ApiVersion, UNVERSIONED_PATH_PREFIX};

use crate::error::ConfigError;

/// App-level configuration.
///
/// `ShopifyConfig` is `Clone`, `Send` and `Sync`; one instance can back any
/// number of per-shop clients.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    api_key: ApiKey,
    api_secret_key: Option<ApiSecretKey>,
    password: Option<AppPassword>,
    api_version: Option<ApiVersion>,
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret key, if configured.
    #[must_use]
    pub const fn api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.api_secret_key.as_ref()
    }

    /// Returns the private app password, if configured.
    #[must_use]
    pub const fn password(&self) -> Option<&AppPassword> {
        self.password.as_ref()
    }

    /// Returns the default API version, if configured.
    ///
    /// `None` means requests use the unversioned `admin` prefix.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }
}

/// Builder for [`ShopifyConfig`].
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    password: Option<AppPassword>,
    api_version: Option<ApiVersion>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret key.
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the private app password used for HTTP basic auth.
    ///
    /// Basic auth is only used when a client has no access token.
    #[must_use]
    pub fn password(mut self, password: AppPassword) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the default API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no API key was set.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ShopifyConfig {
            api_key,
            api_secret_key: self.api_secret_key,
            password: self.password,
            api_version: self.api_version,
        })
    }
}

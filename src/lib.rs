//! # Shopify REST Client
//!
//! A typed client for the Shopify REST Admin API, with rate-limit aware
//! retries, structured error classification and cursor pagination.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe app configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`]
//! - Validated newtypes for credentials, shop domains and API versions
//! - A per-shop [`Client`] that builds authenticated requests, retries
//!   throttled (429) and unavailable (503) responses and classifies failures
//!   into [`ResponseError`]
//! - Cursor pagination parsed from the `Link` header into [`Pagination`]
//! - Rate-limit telemetry from `X-Shopify-Shop-Api-Call-Limit` and `Retry-After`
//! - Typed resource clients in [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_rest::{ApiKey, ApiVersion, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use shopify_rest::{Client, ProductListOptions, ProductService};
//!
//! let client = Client::builder(config, "my-store")
//!     .access_token("shpat_xxx")
//!     .retries(3)
//!     .build()?;
//!
//! // Typed resources
//! let (products, pagination) = client
//!     .products()
//!     .list_with_pagination(&ProductListOptions::default())
//!     .await?;
//!
//! // Or any endpoint, decoded into your own type
//! let shop: serde_json::Value = client.get("shop.json", &()).await?;
//! ```
//!
//! ## Logging
//!
//! Requests and responses are logged at debug level through the `tracing`
//! crate by default. Install a subscriber to see them, or pass a
//! [`StreamLogger`] to [`ClientBuilder::logger`].
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: clients are `Send + Sync` and share no per-call state
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{
    ApiKey, ApiSecretKey, ApiVersion, AppPassword, ShopDomain, ShopifyConfig,
    ShopifyConfigBuilder,
};
pub use error::ConfigError;

// Re-export client engine types
pub use clients::{
    check_response, classify, extract_pagination, retry_decision, ApiResponse, Client,
    ClientBuilder, HttpError, HttpMethod, InvalidHttpRequestError, LogLevel, Logger, PageOptions,
    Pagination, PaginationError, PreparedRequest, RateLimitInfo, RateLimitTracker, RawResponse,
    ReqwestTransport, ResponseError, RetryDecision, StreamLogger, TracingLogger, Transport,
    TransportError,
};

// Re-export resource types
pub use resources::{
    fulfillment_path_prefix, metafield_path_prefix, AbandonedCheckout,
    AbandonedCheckoutListOptions, AbandonedCheckoutService, Collection, CollectionService,
    CountOptions, Fulfillment, FulfillmentInfo, FulfillmentService, GetOptions, ListOptions,
    Metafield, MetafieldService, PriceRule, PriceRuleService, Product, ProductListOptions,
    ProductService, ShippingZone, ShippingZoneService, Theme, ThemeListOptions, ThemeRole,
    ThemeService,
};

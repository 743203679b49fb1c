//! The Shopify REST client and its execution engine.
//!
//! A [`Client`] is bound to one shop. It builds authenticated requests,
//! sends them through its [`Transport`], classifies failures, retries
//! rate-limited and unavailable responses within the configured budget, and
//! decodes JSON bodies.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{ApiKey, Client, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .build()?;
//! let client = Client::builder(config, "my-store")
//!     .access_token("shpat_xxx")
//!     .api_version("2024-10")
//!     .retries(3)
//!     .build()?;
//!
//! let shop: serde_json::Value = client.get("shop.json", &()).await?;
//! println!("{shop}, {} calls left", client.rate_limits().remaining());
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{
    flatten_query, join_path, merge_query, resolve_url, HttpMethod, PreparedRequest,
};
use crate::clients::http_response::ApiResponse;
use crate::clients::logger::{Logger, TracingLogger};
use crate::clients::pagination::Pagination;
use crate::clients::rate_limit::{RateLimitInfo, RateLimitTracker};
use crate::clients::response_error::check_response;
use crate::clients::retry::{retry_decision, RetryDecision};
use crate::clients::transport::{RawResponse, ReqwestTransport, Transport};
use crate::config::{path_prefix_for, ApiVersion, ShopDomain, ShopifyConfig};
use crate::error::ConfigError;

/// The fixed `User-Agent` sent with every request.
pub const SDK_USER_AGENT: &str = concat!("shopify-rest-client/", env!("CARGO_PKG_VERSION"));

/// Request header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Response header reporting the API version that served the request.
pub const API_VERSION_HEADER: &str = "x-shopify-api-version";

/// Response header set when a deprecated endpoint or field was used.
pub const DEPRECATED_REASON_HEADER: &str = "x-shopify-api-deprecated-reason";

/// A client bound to one shop.
///
/// `Client` is `Send + Sync`. Rate-limit telemetry and the attempt count of
/// each call are returned in its [`ApiResponse`]; the client also remembers
/// the last-observed rate limits and the server-reported API version.
pub struct Client {
    config: ShopifyConfig,
    shop: ShopDomain,
    base_url: Url,
    api_version: Option<ApiVersion>,
    path_prefix: String,
    default_headers: HeaderMap,
    retries: u32,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn Logger>,
    rate_limits: RateLimitTracker,
    detected_api_version: OnceLock<String>,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

impl Client {
    /// Creates a builder for a client bound to `shop`.
    ///
    /// `shop` may be a bare shop name or a `*.myshopify.com` domain.
    #[must_use]
    pub fn builder(config: ShopifyConfig, shop: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(config, shop)
    }

    /// Returns the app configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopifyConfig {
        &self.config
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the shop name without the `.myshopify.com` suffix.
    #[must_use]
    pub fn shop_short_name(&self) -> &str {
        self.shop.shop_name()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the API path prefix, e.g. `admin/api/2024-10` or `admin`.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the configured API version, or the version the server reported
    /// on the first successful call when none was configured.
    #[must_use]
    pub fn api_version(&self) -> Option<String> {
        self.api_version
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| self.detected_api_version.get().cloned())
    }

    /// Returns the last-observed rate-limit telemetry.
    #[must_use]
    pub fn rate_limits(&self) -> RateLimitInfo {
        self.rate_limits.snapshot()
    }

    /// Builds a request for a path relative to the base URL.
    ///
    /// `body` and `options` are "absent" when they serialize to null, so `&()`
    /// or `&None::<T>` can be passed. Options are flattened into the query and
    /// merged with any query already on `rel_path`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the path cannot be resolved,
    /// the body cannot be serialized or the options cannot be flattened.
    pub fn new_request<B, O>(
        &self,
        method: HttpMethod,
        rel_path: &str,
        body: &B,
        options: &O,
    ) -> Result<PreparedRequest, HttpError>
    where
        B: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        let mut url = resolve_url(&self.base_url, rel_path)?;

        if let Some(pairs) = flatten_query(options)? {
            merge_query(&mut url, pairs);
        }

        let body = serde_json::to_vec(body).map_err(|err| InvalidHttpRequestError::InvalidBody {
            message: err.to_string(),
        })?;
        let body = (body != b"null").then_some(body);

        Ok(PreparedRequest::new(
            method,
            url,
            self.default_headers.clone(),
            body,
        ))
    }

    /// Sends a built request, retrying 429 and 503 responses within the
    /// retry budget.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Transport`] if no response was received (never retried)
    /// - [`HttpError::Response`] with the last classified failure
    pub async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, HttpError> {
        self.log_request(&request);

        let mut attempts: u32 = 0;
        let mut remaining = self.retries;
        loop {
            let raw = self.transport.send(&request).await?;
            attempts += 1;
            self.log_response(&raw);

            let error = match check_response(raw.status, &raw.headers, &raw.body) {
                Ok(()) => return Ok(self.complete(raw, attempts)),
                Err(error) => error,
            };

            match retry_decision(&error, remaining) {
                RetryDecision::GiveUp => return Err(error.into()),
                RetryDecision::RetryAfter(wait) => {
                    self.logger
                        .debug(format_args!("rate limited waiting {}s", wait.as_secs_f64()));
                    tokio::time::sleep(wait).await;
                }
                RetryDecision::RetryNow => {
                    self.logger
                        .debug(format_args!("service unavailable, retrying"));
                }
            }
            remaining = remaining.saturating_sub(1);
        }
    }

    /// Builds a request for a path under the API prefix and executes it.
    ///
    /// # Errors
    ///
    /// See [`Client::new_request`] and [`Client::execute`].
    pub async fn create_and_do<B, O>(
        &self,
        method: HttpMethod,
        rel_path: &str,
        body: &B,
        options: &O,
    ) -> Result<ApiResponse, HttpError>
    where
        B: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        let path = join_path(&self.path_prefix, rel_path);
        let request = self.new_request(method, &path, body, options)?;
        self.execute(request).await
    }

    /// Performs a GET and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request, response or decoding failure.
    pub async fn get<T, O>(&self, path: &str, options: &O) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        let response = self.create_and_do(HttpMethod::Get, path, &(), options).await?;
        Ok(response.json()?)
    }

    /// Performs a GET, decodes the JSON body and parses the `Link` header.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request, response, decoding or pagination
    /// failure.
    pub async fn get_with_pagination<T, O>(
        &self,
        path: &str,
        options: &O,
    ) -> Result<(T, Pagination), HttpError>
    where
        T: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        let response = self.create_and_do(HttpMethod::Get, path, &(), options).await?;
        let body = response.json()?;
        let pagination = response.pagination()?;
        Ok((body, pagination))
    }

    /// Performs a POST with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request, response or decoding failure.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.create_and_do(HttpMethod::Post, path, body, &()).await?;
        Ok(response.json()?)
    }

    /// Performs a PUT with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request, response or decoding failure.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.create_and_do(HttpMethod::Put, path, body, &()).await?;
        Ok(response.json()?)
    }

    /// Performs a DELETE, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request or response failure.
    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        self.create_and_do(HttpMethod::Delete, path, &(), &()).await?;
        Ok(())
    }

    /// Reads `{"count": n}` from a count endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request, response or decoding failure.
    pub async fn count<O>(&self, path: &str, options: &O) -> Result<u64, HttpError>
    where
        O: Serialize + ?Sized,
    {
        let response: CountResponse = self.get(path, options).await?;
        Ok(response.count)
    }

    fn complete(&self, raw: RawResponse, attempts: u32) -> ApiResponse {
        if self.api_version.is_none() {
            if let Some(version) = raw.headers.get(API_VERSION_HEADER).and_then(|v| v.to_str().ok()) {
                if self.detected_api_version.set(version.to_string()).is_ok() {
                    self.logger
                        .info(format_args!("api version not set, now using {version}"));
                }
            }
        }

        if let Some(reason) = raw
            .headers
            .get(DEPRECATED_REASON_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            self.logger
                .warn(format_args!("deprecated Shopify API call: {reason}"));
        }

        self.rate_limits.record(&raw.headers);
        let rate_limits = RateLimitInfo::from_headers(&raw.headers);
        ApiResponse::new(raw.status, raw.headers, raw.body, attempts, rate_limits)
    }

    fn log_request(&self, request: &PreparedRequest) {
        self.logger
            .debug(format_args!("{}: {}", request.method(), request.url()));
        if let Some(body) = request.body().filter(|body| !body.is_empty()) {
            self.logger
                .debug(format_args!("SENT: {}", String::from_utf8_lossy(body)));
        }
    }

    fn log_response(&self, response: &RawResponse) {
        let reason = StatusCode::from_u16(response.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default();
        self.logger
            .debug(format_args!("RECV {}: {reason}", response.status));
        if !response.body.is_empty() {
            self.logger
                .debug(format_args!("RESP: {}", String::from_utf8_lossy(&response.body)));
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("shop", &self.shop)
            .field("base_url", &self.base_url.as_str())
            .field("path_prefix", &self.path_prefix)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    config: ShopifyConfig,
    shop: String,
    access_token: Option<String>,
    api_version: Option<Option<ApiVersion>>,
    retries: u32,
    base_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl ClientBuilder {
    /// Creates a builder for `shop` with the app's `config`.
    #[must_use]
    pub fn new(config: ShopifyConfig, shop: impl Into<String>) -> Self {
        Self {
            config,
            shop: shop.into(),
            access_token: None,
            api_version: None,
            retries: 0,
            base_url: None,
            transport: None,
            logger: None,
        }
    }

    /// Sets the access token. An empty token is treated as absent.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Overrides the configured API version.
    ///
    /// Invalid or empty values select the unversioned `admin` prefix.
    #[must_use]
    pub fn api_version(mut self, version: impl AsRef<str>) -> Self {
        self.api_version = Some(ApiVersion::parse_lenient(version.as_ref()));
        self
    }

    /// Sets the retry budget: the maximum number of attempts per call.
    ///
    /// `0` and `1` both mean a single attempt.
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Overrides the base URL, e.g. for a proxy or a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Uses a custom transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Uses a preconfigured `reqwest::Client` as the transport.
    #[must_use]
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(Arc::new(ReqwestTransport::from_client(client)))
    }

    /// Uses a custom logger.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidShopDomain`] if the shop name is invalid
    /// - [`ConfigError::InvalidBaseUrl`] if the base URL override is invalid
    /// - [`ConfigError::InvalidCredential`] if a credential cannot be sent as a header
    /// - [`ConfigError::TransportInit`] if the default transport cannot be created
    pub fn build(self) -> Result<Client, ConfigError> {
        let shop = ShopDomain::new(self.shop)?;

        let base_url = match self.base_url {
            Some(url) => parse_base_url(&url)?,
            None => parse_base_url(&shop.base_url())?,
        };

        let api_version = self
            .api_version
            .unwrap_or_else(|| self.config.api_version().cloned());
        if let Some(version) = &api_version {
            tracing::debug!("Using API version {version} for {shop}");
        }
        let path_prefix = path_prefix_for(api_version.as_ref());

        let default_headers = default_headers(&self.config, self.access_token.as_deref())?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new().map_err(|err| {
                ConfigError::TransportInit {
                    reason: err.to_string(),
                }
            })?),
        };
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));

        Ok(Client {
            config: self.config,
            shop,
            base_url,
            api_version,
            path_prefix,
            default_headers,
            retries: self.retries,
            transport,
            logger,
            rate_limits: RateLimitTracker::new(),
            detected_api_version: OnceLock::new(),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("shop", &self.shop)
            .field("retries", &self.retries)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn parse_base_url(url: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl {
        url: url.to_string(),
    };
    let mut parsed = Url::parse(url).map_err(|_| invalid())?;
    if parsed.cannot_be_a_base() {
        return Err(invalid());
    }
    // Relative joins replace the last segment unless the path ends in '/'.
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}

/// Content negotiation, user agent and auth. A token wins over basic auth.
fn default_headers(
    config: &ShopifyConfig,
    access_token: Option<&str>,
) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));

    if let Some(token) = access_token {
        let mut value = HeaderValue::from_str(token).map_err(|_| ConfigError::InvalidCredential {
            field: "access_token",
        })?;
        value.set_sensitive(true);
        headers.insert(ACCESS_TOKEN_HEADER, value);
    } else if let Some(password) = config.password() {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            config.api_key().as_ref(),
            password.as_ref()
        ));
        let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|_| ConfigError::InvalidCredential { field: "password" })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

//! HTTP client types for the Shopify REST Admin API.
//!
//! This module holds the request engine: it builds authenticated requests,
//! sends them through a pluggable transport, classifies failures, honors
//! rate limits and parses pagination links.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Client`]: a client bound to one shop, built with [`ClientBuilder`]
//! - [`PreparedRequest`]: a fully-built request, produced by [`Client::new_request`]
//! - [`ApiResponse`]: a successful response with its attempt count and rate limits
//! - [`ResponseError`]: a classified non-2xx (or undecodable) response
//! - [`Pagination`] / [`PageOptions`]: cursors parsed from the `Link` header
//! - [`Transport`]: the send seam, implemented by [`ReqwestTransport`]
//! - [`Logger`]: the logging seam, implemented by [`TracingLogger`] and [`StreamLogger`]
//!
//! # Retry Behavior
//!
//! The retry budget set with [`ClientBuilder::retries`] is the maximum number
//! of attempts per call:
//!
//! - **429 (Rate Limited)**: waits for the `Retry-After` value, then retries
//! - **503 (Service Unavailable)**: retries immediately
//! - **Anything else**: returned to the caller without retry
//!
//! Transport failures are never retried.

mod client;
mod errors;
mod http_request;
mod http_response;
mod logger;
mod pagination;
mod rate_limit;
mod response_error;
mod retry;
mod transport;

pub use client::{
    Client, ClientBuilder, ACCESS_TOKEN_HEADER, API_VERSION_HEADER, DEPRECATED_REASON_HEADER,
    SDK_USER_AGENT,
};
pub use errors::{HttpError, InvalidHttpRequestError, TransportError};
pub use http_request::{HttpMethod, PreparedRequest};
pub use http_response::ApiResponse;
pub use logger::{LogLevel, Logger, StreamLogger, TracingLogger};
pub use pagination::{extract_pagination, PageOptions, Pagination, PaginationError, LINK_HEADER};
pub use rate_limit::{RateLimitInfo, RateLimitTracker, CALL_LIMIT_HEADER, RETRY_AFTER_HEADER};
pub use response_error::{check_response, classify, ResponseError};
pub use retry::{retry_decision, RetryDecision};
pub use transport::{RawResponse, ReqwestTransport, Transport, DEFAULT_TIMEOUT};

//! Rate-limit telemetry parsed from Shopify response headers.
//!
//! Shopify reports leaky-bucket usage in `X-Shopify-Shop-Api-Call-Limit`
//! (`"<used>/<bucket>"`) and, when throttling, a fractional `Retry-After`.
//! Parse failures are never errors: the affected field is left at zero.

use std::sync::{Mutex, PoisonError};

use reqwest::header::HeaderMap;

/// Header carrying the `<used>/<bucket>` call counter.
pub const CALL_LIMIT_HEADER: &str = "x-shopify-shop-api-call-limit";

/// Header carrying the server-dictated backoff, in fractional seconds.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Last-observed rate-limit state.
///
/// # Example
///
/// ```rust
/// use reqwest::header::{HeaderMap, HeaderValue};
/// use shopify_rest::RateLimitInfo;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("X-Shopify-Shop-Api-Call-Limit", HeaderValue::from_static("40/80"));
/// headers.insert("Retry-After", HeaderValue::from_static("2.5"));
///
/// let info = RateLimitInfo::from_headers(&headers);
/// assert_eq!(info.request_count, 40);
/// assert_eq!(info.bucket_size, 80);
/// assert!((info.retry_after_seconds - 2.5).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateLimitInfo {
    /// Requests currently counted against the bucket.
    pub request_count: u32,
    /// Capacity of the bucket.
    pub bucket_size: u32,
    /// Seconds the server asked the client to wait, or zero.
    pub retry_after_seconds: f64,
}

impl RateLimitInfo {
    /// Parses rate-limit state from response headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let (request_count, bucket_size) = call_limit(headers).unwrap_or_default();
        Self {
            request_count,
            bucket_size,
            retry_after_seconds: retry_after_seconds(headers),
        }
    }

    /// Requests left before the bucket is full.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.bucket_size.saturating_sub(self.request_count)
    }
}

/// Parses `"<used>/<bucket>"`. Returns `None` when the header is missing or not
/// two slash-separated parts; each part independently falls back to zero.
fn call_limit(headers: &HeaderMap) -> Option<(u32, u32)> {
    let value = headers.get(CALL_LIMIT_HEADER)?.to_str().ok()?;
    let (used, bucket) = value.split_once('/')?;
    if bucket.contains('/') {
        return None;
    }
    Some((
        used.trim().parse().unwrap_or(0),
        bucket.trim().parse().unwrap_or(0),
    ))
}

/// Parses `Retry-After` as fractional seconds, zero when absent or invalid.
pub(crate) fn retry_after_seconds(headers: &HeaderMap) -> f64 {
    headers
        .get(RETRY_AFTER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .unwrap_or(0.0)
}

/// Client-wide record of the most recent rate-limit telemetry.
///
/// Updated after every successful response. The call counter is only
/// overwritten when the response carries it; `Retry-After` always is.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    last: Mutex<RateLimitInfo>,
}

impl RateLimitTracker {
    /// Creates a tracker with all fields at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the headers of a response into the tracked state and returns
    /// the updated snapshot.
    pub fn record(&self, headers: &HeaderMap) -> RateLimitInfo {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((request_count, bucket_size)) = call_limit(headers) {
            last.request_count = request_count;
            last.bucket_size = bucket_size;
        }
        last.retry_after_seconds = retry_after_seconds(headers);
        *last
    }

    /// Returns a copy of the last-observed state.
    #[must_use]
    pub fn snapshot(&self) -> RateLimitInfo {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

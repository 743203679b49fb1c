//! The result of a successful call.
//!
//! [`ApiResponse`] is call-scoped: it carries the attempt count and the
//! rate-limit telemetry of the response that completed the call, so
//! concurrent calls on one client never observe each other's state.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::clients::pagination::{extract_pagination, Pagination, PaginationError, LINK_HEADER};
use crate::clients::rate_limit::RateLimitInfo;
use crate::clients::response_error::ResponseError;

/// A successful (2xx) response and the metadata of the call that produced it.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
    attempts: u32,
    rate_limits: RateLimitInfo,
}

impl ApiResponse {
    pub(crate) const fn new(
        status: u16,
        headers: HeaderMap,
        body: Vec<u8>,
        attempts: u32,
        rate_limits: RateLimitInfo,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            attempts,
            rate_limits,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns how many attempts the call took.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the rate-limit telemetry of this response.
    #[must_use]
    pub const fn rate_limits(&self) -> RateLimitInfo {
        self.rate_limits
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::DecodingFailed`] if the body is not valid JSON
    /// for `T`. An empty body always fails to decode.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ResponseError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| ResponseError::decoding_failed(self.status, &self.body, &err))
    }

    /// Parses the `Link` header into page selectors.
    ///
    /// # Errors
    ///
    /// Returns a [`PaginationError`] if the header is malformed.
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        extract_pagination(self.header(LINK_HEADER).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shop {
        name: String,
    }

    fn response(body: &str, headers: HeaderMap) -> ApiResponse {
        ApiResponse::new(200, headers, body.as_bytes().to_vec(), 1, RateLimitInfo::default())
    }

    #[test]
    fn test_json_decodes_body() {
        let shop: Shop = response(r#"{"name": "fooshop"}"#, HeaderMap::new())
            .json()
            .unwrap();
        assert_eq!(shop.name, "fooshop");
    }

    #[test]
    fn test_json_failure_is_decoding_failed_with_success_status() {
        let err = response("{not json", HeaderMap::new())
            .json::<Shop>()
            .unwrap_err();
        assert!(matches!(err, ResponseError::DecodingFailed { status: 200, .. }));

        let err = response("", HeaderMap::new()).json::<Shop>().unwrap_err();
        assert!(matches!(err, ResponseError::DecodingFailed { .. }));
    }

    #[test]
    fn test_pagination_without_link_header_is_empty() {
        let pagination = response("{}", HeaderMap::new()).pagination().unwrap();
        assert_eq!(pagination, Pagination::default());
    }

    #[test]
    fn test_pagination_reads_link_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Link",
            HeaderValue::from_static(
                r#"<https://fooshop.myshopify.com/admin/products.json?page_info=abc>; rel="next""#,
            ),
        );
        let pagination = response("{}", headers).pagination().unwrap();
        assert_eq!(pagination.next_page_options.unwrap().page_info, "abc");
    }
}

//! The HTTP transport seam.
//!
//! The engine never talks to the network directly. It hands each attempt to a
//! [`Transport`] and gets back a fully-read [`RawResponse`]. The default
//! [`ReqwestTransport`] uses `reqwest` with rustls and a fixed per-request
//! timeout; callers can pass their own `reqwest::Client` to control timeouts,
//! TLS and pooling, or implement [`Transport`] themselves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::clients::errors::TransportError;
use crate::clients::http_request::PreparedRequest;

/// Default per-request timeout of the built-in transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A response as received from the wire, body fully read.
#[derive(Clone, Debug, Default)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends one request attempt.
///
/// A returned error means no response was received; the engine does not
/// retry it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and reads the full response.
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with rustls and the [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport with rustls and a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps a preconfigured `reqwest::Client`.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method().to_reqwest(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;
    use reqwest::Url;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prepared(server: &MockServer, body: Option<&str>) -> PreparedRequest {
        let url = Url::parse(&format!("{}/admin/shop.json", server.uri())).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("X-Test", "yes".parse().unwrap());
        PreparedRequest::new(
            HttpMethod::Post,
            url,
            headers,
            body.map(|b| b.as_bytes().to_vec()),
        )
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/shop.json"))
            .and(header("X-Test", "yes"))
            .and(body_string(r#"{"a":1}"#))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("X-Custom", "value")
                    .set_body_string("created"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(&prepared(&server, Some(r#"{"a":1}"#)))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.headers.get("x-custom").unwrap(), "value");
        assert_eq!(response.body, b"created");
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_connection_failures() {
        let request = PreparedRequest::new(
            HttpMethod::Get,
            Url::parse("http://127.0.0.1:1/admin/shop.json").unwrap(),
            HeaderMap::new(),
            None,
        );

        let transport = ReqwestTransport::with_timeout(Duration::from_secs(2)).unwrap();
        let err = transport.send(&request).await.unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
    }
}

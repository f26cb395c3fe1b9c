//! HTTP transport abstraction
//!
//! This module provides a trait-based abstraction over HTTP execution,
//! enabling unit testing of the request pipeline without real network
//! calls. The transport makes exactly one attempt per request; retries and
//! back-off are the caller's concern.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::request::{HttpMethod, ReadyRequest};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request could not be sent or the connection failed
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    BodyRead(String),
}

/// Raw HTTP response returned by a transport
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport abstraction
///
/// This trait enables unit testing of the request pipeline by allowing
/// mock implementations to be injected instead of a real HTTP client.
/// Implementations are expected to be safe for concurrent use.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request and return the raw response
    async fn send(&self, request: &ReadyRequest) -> Result<HttpResponse, TransportError>;
}

/// Real HTTP transport backed by a pooled `reqwest` client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default timeout and user agent
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS), None)
    }

    /// Create a transport with a custom timeout and optional user agent
    pub fn with_timeout(timeout: Duration, user_agent: Option<&str>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(concat!("binance-rest/", env!("CARGO_PKG_VERSION"))))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &ReadyRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!("Dispatching request");

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Mock transport for testing
///
/// Allows injecting predefined responses and capturing dispatched
/// requests for assertions.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTransport {
    /// Responses to return, in order
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    /// Requests captured from send()
    sent: parking_lot::Mutex<Vec<ReadyRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self {
            responses: parking_lot::Mutex::new(std::collections::VecDeque::new()),
            sent: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns a single 200 response with the given body
    pub fn with_response(body: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_response(200, body);
        mock
    }

    /// Queue a response
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses.lock().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests captured so far
    pub fn sent_requests(&self) -> Vec<ReadyRequest> {
        self.sent.lock().clone()
    }

    /// Number of requests dispatched through this mock
    pub fn request_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ReadyRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::RequestFailed("no queued response".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBuilder;

    #[tokio::test]
    async fn mock_returns_queued_responses_in_order() {
        let mock = MockTransport::new();
        mock.push_response(200, "first");
        mock.push_response(418, "second");

        let request = RequestBuilder::new("https://mock.test/a")
            .build()
            .finalize(None, 0)
            .unwrap();

        let first = mock.send(&request).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body, "first");
        assert!(first.is_success());

        let second = mock.send(&request).await.unwrap();
        assert_eq!(second.status, 418);
        assert!(!second.is_success());

        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn mock_captures_dispatched_requests() {
        let mock = MockTransport::with_response("{}");
        let request = RequestBuilder::new("https://mock.test/depth")
            .param("symbol", "BTCUSDT")
            .build()
            .finalize(None, 0)
            .unwrap();

        mock.send(&request).await.unwrap();

        let sent = mock.sent_requests();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].url.contains("symbol=BTCUSDT"));
    }

    #[tokio::test]
    async fn mock_surfaces_queued_errors() {
        let mock = MockTransport::new();
        mock.push_error(TransportError::RequestFailed("connection reset".into()));

        let request = RequestBuilder::new("https://mock.test/time")
            .build()
            .finalize(None, 0)
            .unwrap();

        let result = mock.send(&request).await;
        assert!(matches!(result, Err(TransportError::RequestFailed(_))));
    }
}

//! Request construction and the signing strategy dispatcher
//!
//! A request moves through three shapes: a fluent [`RequestBuilder`], the
//! immutable [`PendingRequest`] descriptor it builds, and the wire-ready
//! [`ReadyRequest`] produced by [`PendingRequest::finalize`]. Finalization
//! consumes the descriptor, so a request can be signed at most once and a
//! builder can never be reused across calls.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::{Credentials, SignatureAlgorithm};
use crate::error::{RestError, RestResult};
use crate::query::ParamSet;

/// Header carrying the API key on signed requests
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET - parameters travel in the query string
    Get,
    /// POST - parameters travel as a form body
    Post,
    /// PUT - parameters travel as a form body
    Put,
    /// DELETE - parameters travel as a form body
    Delete,
}

impl HttpMethod {
    /// Wire representation of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters are carried in a form body rather than the URL
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fluent builder for a single outbound request
///
/// All operations return the builder for chaining and perform no I/O.
/// `build()` yields the immutable descriptor consumed by execution.
#[derive(Debug)]
pub struct RequestBuilder {
    method: HttpMethod,
    url: String,
    headers: BTreeMap<String, String>,
    params: ParamSet,
    signed: bool,
}

impl RequestBuilder {
    /// Start building a GET request for the given URL (base path, no query)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: BTreeMap::new(),
            params: ParamSet::new(),
            signed: false,
        }
    }

    /// Set the HTTP method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a header; last write wins on duplicate keys
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a parameter; last write wins on duplicate keys
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Add a parameter only if the value is present
    pub fn opt_param(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Mark the request for signing and set the API-key header
    pub fn signed(mut self, credentials: &Credentials) -> Self {
        self.signed = true;
        self.headers
            .insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());
        self
    }

    /// Freeze the builder into an immutable request descriptor
    pub fn build(self) -> PendingRequest {
        PendingRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            params: self.params,
            signed: self.signed,
        }
    }
}

/// Immutable descriptor of a request awaiting execution
///
/// Created per call and consumed exactly once by [`finalize`](Self::finalize).
#[derive(Debug)]
pub struct PendingRequest {
    method: HttpMethod,
    url: String,
    headers: BTreeMap<String, String>,
    params: ParamSet,
    signed: bool,
}

impl PendingRequest {
    /// The HTTP method this request will use
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Whether this request will be signed
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Resolve the final URL, body, and headers for dispatch
    ///
    /// For signed requests the timestamp parameter is injected first, the
    /// canonical query is rendered, and the signature is computed over the
    /// complete parameter set before anything touches the network:
    ///
    /// - signed GET: HMAC-SHA256; the signature is appended to the query
    ///   string, never sent as a body.
    /// - signed POST/PUT/DELETE: HMAC-SHA512; the signature becomes the
    ///   final `signature` pair of the form-encoded body.
    ///
    /// Unsigned requests send their parameters as-is with no timestamp.
    pub fn finalize(
        mut self,
        credentials: Option<&Credentials>,
        timestamp_ms: u64,
    ) -> RestResult<ReadyRequest> {
        let body = if self.method.is_mutating() {
            let body = if self.signed {
                let credentials = credentials.ok_or(RestError::AuthRequired)?;
                self.params.insert("timestamp", timestamp_ms.to_string());
                let rendered = self.params.canonical_query();
                let signature = credentials.sign(&rendered, SignatureAlgorithm::HmacSha512);
                format!("{}&signature={}", rendered, signature)
            } else {
                self.params.canonical_query()
            };
            self.headers.insert(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            );
            Some(body)
        } else {
            if self.signed {
                let credentials = credentials.ok_or(RestError::AuthRequired)?;
                self.params.insert("timestamp", timestamp_ms.to_string());
                let rendered = self.params.canonical_query();
                let signature = credentials.sign(&rendered, SignatureAlgorithm::HmacSha256);
                self.url = format!("{}?{}&signature={}", self.url, rendered, signature);
            } else if !self.params.is_empty() {
                self.url = format!("{}?{}", self.url, self.params.canonical_query());
            }
            None
        };

        Ok(ReadyRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body,
        })
    }
}

/// A wire-ready request handed to the transport
#[derive(Debug, Clone)]
pub struct ReadyRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Fully resolved URL, query string included
    pub url: String,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// Form-encoded body for mutating methods
    pub body: Option<String>,
}

/// Current wall-clock time in milliseconds since epoch
pub(crate) fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    fn creds() -> Credentials {
        Credentials::new("test-api-key", "test-secret-key")
    }

    #[test]
    fn unsigned_get_appends_raw_query() {
        let ready = RequestBuilder::new("https://api.example.com/api/v1/depth")
            .param("symbol", "BTCUSDT")
            .param("limit", "100")
            .build()
            .finalize(None, 1_700_000_000_000)
            .unwrap();

        assert_eq!(
            ready.url,
            "https://api.example.com/api/v1/depth?limit=100&symbol=BTCUSDT"
        );
        assert!(ready.body.is_none());
        assert!(!ready.url.contains("timestamp="));
        assert!(!ready.url.contains("signature="));
    }

    #[test]
    fn unsigned_get_without_params_keeps_bare_url() {
        let ready = RequestBuilder::new("https://api.example.com/api/v1/time")
            .build()
            .finalize(None, 0)
            .unwrap();
        assert_eq!(ready.url, "https://api.example.com/api/v1/time");
    }

    #[test]
    fn signed_get_injects_timestamp_and_appends_signature() {
        let creds = creds();
        let ready = RequestBuilder::new("https://api.example.com/api/v3/account")
            .signed(&creds)
            .build()
            .finalize(Some(&creds), 1_700_000_000_000)
            .unwrap();

        assert!(ready.url.contains("timestamp=1700000000000"));
        let (_, signature) = ready.url.rsplit_once("&signature=").unwrap();

        // The signature must re-derive from the query between '?' and the
        // signature pair, with the 256-bit variant.
        let (_, query) = ready.url.split_once('?').unwrap();
        let signed_part = query.strip_suffix(&format!("&signature={}", signature)).unwrap();
        assert_eq!(
            signature,
            creds.sign(signed_part, SignatureAlgorithm::HmacSha256)
        );
    }

    #[test]
    fn caller_supplied_timestamp_is_overwritten_by_dispatcher() {
        let creds = creds();
        let ready = RequestBuilder::new("https://api.example.com/api/v3/account")
            .param("timestamp", "1")
            .signed(&creds)
            .build()
            .finalize(Some(&creds), 1_700_000_000_000)
            .unwrap();

        assert!(ready.url.contains("timestamp=1700000000000"));
        assert!(!ready.url.contains("timestamp=1&"));
    }

    #[test]
    fn signed_mutating_request_signs_the_body() {
        let creds = creds();
        let ready = RequestBuilder::new("https://api.example.com/api/v3/order")
            .method(HttpMethod::Post)
            .param("symbol", "LTCBTC")
            .param("side", "BUY")
            .param("quantity", "1")
            .signed(&creds)
            .build()
            .finalize(Some(&creds), 1_700_000_000_000)
            .unwrap();

        // Parameters never leak into the URL.
        assert!(!ready.url.contains('?'));
        assert_eq!(
            ready.headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );

        let body = ready.body.unwrap();
        let (signed_part, signature) = body.rsplit_once("&signature=").unwrap();
        assert!(signed_part.contains("timestamp=1700000000000"));
        assert_eq!(
            signature,
            creds.sign(signed_part, SignatureAlgorithm::HmacSha512)
        );
    }

    #[test]
    fn unsigned_mutating_request_sends_raw_form_body() {
        let ready = RequestBuilder::new("https://api.example.com/api/v3/order")
            .method(HttpMethod::Delete)
            .param("symbol", "LTCBTC")
            .build()
            .finalize(None, 1_700_000_000_000)
            .unwrap();

        assert_eq!(ready.body.as_deref(), Some("symbol=LTCBTC"));
    }

    #[test]
    fn signed_request_without_credentials_is_rejected() {
        let creds = creds();
        let pending = RequestBuilder::new("https://api.example.com/api/v3/account")
            .signed(&creds)
            .build();

        let result = pending.finalize(None, 0);
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }

    #[test]
    fn signed_marks_api_key_header_immediately() {
        let creds = creds();
        let ready = RequestBuilder::new("https://api.example.com/api/v3/account")
            .signed(&creds)
            .build()
            .finalize(Some(&creds), 0)
            .unwrap();

        assert_eq!(
            ready.headers.get(API_KEY_HEADER).map(String::as_str),
            Some("test-api-key")
        );
    }

    #[test]
    fn header_last_write_wins() {
        let ready = RequestBuilder::new("https://api.example.com/api/v1/time")
            .header("X-Custom", "first")
            .header("X-Custom", "second")
            .build()
            .finalize(None, 0)
            .unwrap();

        assert_eq!(
            ready.headers.get("X-Custom").map(String::as_str),
            Some("second")
        );
    }
}

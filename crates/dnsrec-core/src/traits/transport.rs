//! HTTP transport seam
//!
//! Providers build an [`ApiRequest`] (method, URL and the complete query
//! string, credentials included) and hand it to a [`Transport`]. The
//! transport returns the raw status code and body; interpreting them is the
//! provider's job.
//!
//! Cancellation is applied around [`Transport::send`] by the caller through
//! [`crate::CallContext::run`], so implementations only need to be
//! cancel-safe (dropping the future aborts the request).

use async_trait::async_trait;
use std::fmt;

/// HTTP methods used by provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// One outgoing API call
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Endpoint URL without query string
    pub url: String,
    /// Query parameters, in the order they are sent
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request with an empty query
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
        }
    }

    /// Set a query parameter, replacing an earlier value for the same key
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Look up a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Query values include credentials, so only the keys are shown.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.query.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query_keys", &keys)
            .finish()
    }
}

/// Raw API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues HTTP calls for a provider
///
/// # Trust Level
///
/// Transports perform exactly one request per call. They do not retry,
/// back off, rate-limit or cache; a failed call is returned as
/// [`crate::Error::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return status and body
    async fn send(&self, request: &ApiRequest) -> crate::Result<ApiResponse>;
}

//! reqwest-backed [`Transport`]

use async_trait::async_trait;
use dnsrec_core::{ApiRequest, ApiResponse, Error, HttpMethod, Result, Transport};
use std::time::Duration;

/// HTTP transport used in production
///
/// Sends the query parameters as the URL query string for both GET and
/// POST, the way the ClouDNS API expects them.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dnsrec/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        // Credentials travel in the query string, keep the URL out of errors
        let response = builder
            .query(&request.query)
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e.without_url())))?;

        Ok(ApiResponse::new(status, body))
    }
}

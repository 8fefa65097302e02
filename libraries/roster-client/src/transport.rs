//! HTTP transport capability for the Roster client.
//!
//! The service never talks to the network directly; it goes through the
//! [`ApiTransport`] trait so tests can substitute a mock implementation.
//! [`HttpTransport`] is the production implementation backed by `reqwest`.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Response from a transport call: a status code plus the raw body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response from a status code and body bytes.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Decode the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ClientError::Parse(format!("Failed to parse response body: {}", e)))
    }

    /// Body as (lossy) text, mainly for diagnostics.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Abstract HTTP capability with the four verbs the service needs.
///
/// Paths are absolute (e.g. `/api/v1/users/42`); the implementation owns
/// the host, scheme, and any transport-level policy such as timeouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, path: &str) -> Result<ApiResponse>;

    /// Issue a POST request with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse>;

    /// Issue a PATCH request with a JSON body.
    async fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse>;

    /// Issue a DELETE request.
    async fn delete(&self, path: &str) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`.
    ///
    /// The URL must be non-empty and start with `http://` or `https://`;
    /// trailing slashes are stripped.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Roster/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Base URL this transport points at.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(ClientError::Request)?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        debug!(url = %url, "GET");
        self.execute(self.http.get(&url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        debug!(url = %url, "POST");
        self.execute(self.http.post(&url).json(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        debug!(url = %url, "PATCH");
        self.execute(self.http.patch(&url).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        debug!(url = %url, "DELETE");
        self.execute(self.http.delete(&url)).await
    }
}

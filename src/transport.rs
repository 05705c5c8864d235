//! HTTP transport seam for provider access.
//!
//! Providers never talk to the network directly; they go through the
//! [`Transport`] trait so tests can substitute scripted in-memory transports
//! and the rate gate can wrap any transport uniformly.

use async_trait::async_trait;

use crate::{ResolveError, Result};

/// Raw response from a provider endpoint.
///
/// Status and body are captured eagerly so the response can be inspected
/// (and logged) without holding a live connection.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON into `T`.
    ///
    /// `context` names the payload being decoded and ends up in the error
    /// message when the provider shape does not match.
    pub fn json<T: serde::de::DeserializeOwned>(&self, context: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| ResolveError::decode(context, e))
    }
}

/// Trait for HTTP data sources.
///
/// Implementations abstract over the real network client and test doubles.
/// A single method covers all provider access; both upstream providers are
/// plain GET APIs.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issue a GET request and capture the full response.
    ///
    /// Returns:
    /// - `Ok(response)` - Any HTTP response, including non-2xx statuses
    /// - `Err(e)` - Transport-level failure (connect, DNS, read)
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response =
            self.client.get(url).send().await.map_err(|e| ResolveError::transport(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ResolveError::transport(url, e))?;

        Ok(HttpResponse { status, body })
    }
}

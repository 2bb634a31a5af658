//! HTTP transport seam.
//!
//! [`CmsClient`](crate::CmsClient) only needs "GET this URL and give me the
//! status and body". Keeping that behind a trait lets tests substitute
//! [`MockTransport`](crate::testing::MockTransport) without a live CMS.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CmsError, Result};

/// A GET request against the CMS plus its revalidation hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsRequest {
    pub url: Url,
    /// How long a cached copy of the response may be reused. The transport
    /// decides what, if anything, to do with it.
    pub revalidate: Duration,
}

impl CmsRequest {
    pub fn new(url: Url, revalidate: Duration) -> Self {
        Self { url, revalidate }
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform a GET against the CMS.
///
/// Implementations return `Err` only when no HTTP response was obtained;
/// error statuses come back as a [`RawResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &CmsRequest) -> Result<RawResponse>;
}

/// [`Transport`] backed by `reqwest`.
///
/// The revalidation hint is sent as `Cache-Control: max-age=<secs>` so a
/// caching proxy in front of the CMS can serve a copy up to that age.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a pre-configured client (timeouts, proxies, TLS settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &CmsRequest) -> Result<RawResponse> {
        debug!(url = %request.url, revalidate_secs = request.revalidate.as_secs(), "CMS GET");

        let response = self
            .client
            .get(request.url.clone())
            .header(header::ACCEPT, "application/json")
            .header(
                header::CACHE_CONTROL,
                format!("max-age={}", request.revalidate.as_secs()),
            )
            .send()
            .await
            .map_err(|e| {
                warn!(url = %request.url, error = %e, "CMS request failed");
                CmsError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(304, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }
}

//! Testing utilities.
//!
//! [`MockTransport`] answers requests with canned responses and records what
//! was asked for, so applications can exercise [`crate::CmsClient`] without a
//! running CMS.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{CmsError, Result};
use crate::transport::{CmsRequest, RawResponse, Transport};

#[derive(Debug, Clone)]
enum Canned {
    Response(RawResponse),
    NetworkError(String),
}

/// Mock transport for testing.
///
/// Routes registered with the `*_for` methods are matched against the
/// request's decoded path and query (`/api/atrakcjes?fields[0]=slug`); a
/// route applies when its key is a substring of that target, and the longest
/// matching key wins. Requests no route matches get the default response.
///
/// # Example
///
/// ```rust
/// use cms_client::{CmsClient, CmsConfig};
/// use cms_client::testing::MockTransport;
/// use serde_json::json;
///
/// let transport = MockTransport::new()
///     .with_json(json!({ "data": [] }))
///     .with_json_for("fields[0]=slug", json!({ "data": [{ "id": 1, "slug": "ice-hotel" }] }));
/// let client = CmsClient::with_transport(CmsConfig::default(), transport.clone());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Canned responses keyed by path/query fragment
    routes: Arc<RwLock<HashMap<String, Canned>>>,
    /// Response for requests no route matches
    fallback: Arc<RwLock<Option<Canned>>>,
    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<CmsRequest>>>,
}

impl MockTransport {
    /// Create a mock with no canned response. Requests fail with a network
    /// error until one is configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer unmatched requests with `200 OK` and the given JSON body.
    pub fn with_json(self, body: Value) -> Self {
        self.with_response(200, body.to_string())
    }

    /// Answer unmatched requests with an arbitrary status and raw body.
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        *self.fallback.write().unwrap() = Some(Canned::Response(RawResponse::new(status, body)));
        self
    }

    /// Fail unmatched requests as if the connection could not be made.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        *self.fallback.write().unwrap() = Some(Canned::NetworkError(message.into()));
        self
    }

    /// Answer requests whose path/query contains `route` with `200 OK` and
    /// the given JSON body.
    pub fn with_json_for(self, route: impl Into<String>, body: Value) -> Self {
        self.with_response_for(route, 200, body.to_string())
    }

    /// Answer requests whose path/query contains `route` with an arbitrary
    /// status and raw body.
    pub fn with_response_for(
        self,
        route: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.add_route(route.into(), Canned::Response(RawResponse::new(status, body)));
        self
    }

    /// Fail requests whose path/query contains `route` with a network error.
    pub fn with_network_error_for(
        self,
        route: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.add_route(route.into(), Canned::NetworkError(message.into()));
        self
    }

    fn add_route(&self, route: String, canned: Canned) {
        self.routes.write().unwrap().insert(route, canned);
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<CmsRequest> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn last_call(&self) -> Option<CmsRequest> {
        self.calls.read().unwrap().last().cloned()
    }

    fn canned_for(&self, request: &CmsRequest) -> Option<Canned> {
        let target = route_target(request);
        let routes = self.routes.read().unwrap();

        let routed = routes
            .iter()
            .filter(|(route, _)| target.contains(route.as_str()))
            .max_by_key(|(route, _)| route.len())
            .map(|(_, canned)| canned.clone());

        routed.or_else(|| self.fallback.read().unwrap().clone())
    }
}

/// Decoded `path?query` of a request, e.g. `/api/atrakcjes?fields[0]=slug`.
fn route_target(request: &CmsRequest) -> String {
    let query = request
        .url
        .query_pairs()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        request.url.path().to_string()
    } else {
        format!("{}?{}", request.url.path(), query)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, request: &CmsRequest) -> Result<RawResponse> {
        self.calls.write().unwrap().push(request.clone());

        match self.canned_for(request) {
            Some(Canned::Response(response)) => Ok(response),
            Some(Canned::NetworkError(message)) => Err(CmsError::Network(message)),
            None => Err(CmsError::Network("no canned response configured".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn request(url: &str) -> CmsRequest {
        CmsRequest::new(Url::parse(url).unwrap(), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_routes_match_decoded_query() {
        let transport = MockTransport::new()
            .with_response(200, "fallback")
            .with_response_for("fields[0]=slug", 200, "slugs")
            .with_response_for("filters[slug][$eq]=ice-hotel", 200, "ice-hotel");

        let slugs = transport
            .get(&request("https://cms.test/api/atrakcjes?fields%5B0%5D=slug"))
            .await
            .unwrap();
        let lookup = transport
            .get(&request(
                "https://cms.test/api/atrakcjes?filters%5Bslug%5D%5B%24eq%5D=ice-hotel&populate=*",
            ))
            .await
            .unwrap();
        let other = transport
            .get(&request("https://cms.test/api/atrakcjes?filters%5Bslug%5D%5B%24eq%5D=sauna"))
            .await
            .unwrap();

        assert_eq!(slugs.body, "slugs");
        assert_eq!(lookup.body, "ice-hotel");
        assert_eq!(other.body, "fallback");
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_longest_route_wins() {
        let transport = MockTransport::new()
            .with_response_for("/api/atrakcjes", 200, "collection")
            .with_network_error_for("fields[0]=slug", "reset by peer");

        let result = transport
            .get(&request("https://cms.test/api/atrakcjes?fields%5B0%5D=slug"))
            .await;
        assert!(matches!(result, Err(CmsError::Network(m)) if m == "reset by peer"));

        let result = transport
            .get(&request("https://cms.test/api/atrakcjes?populate=*"))
            .await
            .unwrap();
        assert_eq!(result.body, "collection");
    }

    #[tokio::test]
    async fn test_later_default_replaces_earlier_default() {
        let transport = MockTransport::new()
            .with_response(200, "first")
            .with_response(500, "second");

        let result = transport
            .get(&request("https://cms.test/api/atrakcjes"))
            .await
            .unwrap();
        assert_eq!(result, RawResponse::new(500, "second"));
    }

    #[tokio::test]
    async fn test_unconfigured_mock_fails_as_network_error() {
        let result = MockTransport::new()
            .get(&request("https://cms.test/api/atrakcjes"))
            .await;
        assert!(matches!(result, Err(CmsError::Network(_))));
    }
}

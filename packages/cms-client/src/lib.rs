//! Strapi CMS client for attraction detail pages.
//!
//! Fetches attraction entries by slug and normalizes them into a stable
//! [`AttractionRecord`], whether the CMS answers in the nested
//! (`attributes`-wrapped) or the flat response shape. Also lists the slugs of
//! all entries for static path generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use cms_client::{CmsClient, CmsConfig, Lookup};
//!
//! let client = CmsClient::new(CmsConfig::from_env()?);
//!
//! match client.fetch_attraction_by_slug("northern-lights").await {
//!     Lookup::Found(attraction) => println!("{}", attraction.title),
//!     Lookup::NotFound => println!("404"),
//! }
//!
//! for slug in client.list_known_slugs().await {
//!     println!("/attractions/{}", slug);
//! }
//! ```
//!
//! Neither call returns an error. Network failures, error statuses and
//! unreadable payloads are logged and reported as [`Lookup::NotFound`] or an
//! empty slug list. The `try_*` variants expose the underlying [`CmsError`]
//! for diagnostics.

pub mod blocks;
pub mod config;
pub mod error;
pub mod media;
pub mod normalize;
pub mod query;
pub mod testing;
pub mod transport;
pub mod types;
pub mod view;

pub use config::CmsConfig;
pub use error::{CmsError, Result};
pub use transport::{CmsRequest, HttpTransport, RawResponse, Transport};
pub use types::{
    AttractionRecord, Coordinates, DescriptionBlock, ListFormat, Lookup, MediaRef, TextSpan,
};
pub use view::{EntryView, Shape};

use serde_json::Value;
use tracing::{debug, info, warn};

/// Read-only client for the attraction collection.
///
/// Holds no mutable state; clones share the underlying connection pool and
/// may be used concurrently.
#[derive(Debug, Clone)]
pub struct CmsClient<T = HttpTransport> {
    transport: T,
    config: CmsConfig,
}

impl CmsClient<HttpTransport> {
    pub fn new(config: CmsConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Create from `CMS_BASE_URL`, `CMS_COLLECTION` and `CMS_REVALIDATE_SECS`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(CmsConfig::from_env()?))
    }

    /// Use a custom reqwest client (timeouts, proxies, etc.).
    pub fn with_http_client(config: CmsConfig, client: reqwest::Client) -> Self {
        Self::with_transport(config, HttpTransport::with_client(client))
    }
}

impl<T: Transport> CmsClient<T> {
    pub fn with_transport(config: CmsConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    /// Fetch one attraction by slug.
    ///
    /// Returns [`Lookup::NotFound`] for an empty slug, for a slug with no
    /// matching entry, and for any failure along the way.
    pub async fn fetch_attraction_by_slug(&self, slug: &str) -> Lookup<AttractionRecord> {
        match self.try_fetch_attraction_by_slug(slug).await {
            Ok(Some(attraction)) => {
                info!(slug, id = attraction.id, "Fetched attraction");
                Lookup::Found(attraction)
            }
            Ok(None) => {
                info!(slug, "No attraction matches slug");
                Lookup::NotFound
            }
            Err(e) => {
                warn!(slug, error = %e, "Attraction lookup failed, treating as not found");
                Lookup::NotFound
            }
        }
    }

    /// Fetch one attraction by slug, keeping the failure reason.
    ///
    /// `Ok(None)` means the CMS answered and no entry matched.
    pub async fn try_fetch_attraction_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<AttractionRecord>> {
        if slug.trim().is_empty() {
            debug!("Empty slug, skipping CMS request");
            return Ok(None);
        }

        let url = query::attraction_by_slug(&self.config, slug)?;
        let body = self.get_json(CmsRequest::new(url, self.config.revalidate)).await?;

        normalize::normalize_attraction(&body, slug)
    }

    /// Slugs of every entry in the collection, in CMS order.
    ///
    /// Any failure yields an empty list, which callers treat as "resolve
    /// every path on demand".
    pub async fn list_known_slugs(&self) -> Vec<String> {
        match self.try_list_known_slugs().await {
            Ok(slugs) => {
                info!(count = slugs.len(), "Listed attraction slugs");
                slugs
            }
            Err(e) => {
                warn!(error = %e, "Listing attraction slugs failed, returning none");
                Vec::new()
            }
        }
    }

    /// Slugs of every entry in the collection, keeping the failure reason.
    pub async fn try_list_known_slugs(&self) -> Result<Vec<String>> {
        let url = query::slug_list(&self.config)?;
        let body = self.get_json(CmsRequest::new(url, self.config.revalidate)).await?;

        normalize::normalize_slugs(&body)
    }

    async fn get_json(&self, request: CmsRequest) -> Result<Value> {
        let response = self.transport.get(&request).await?;

        if !response.is_success() {
            warn!(url = %request.url, status = response.status, "CMS returned error status");
            return Err(CmsError::Api {
                status: response.status,
                message: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

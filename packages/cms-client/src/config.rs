//! Client configuration.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{CmsError, Result};

/// Public base URL of the Expedition Lapland Strapi instance.
pub const DEFAULT_BASE_URL: &str = "https://api.expeditionlapland.com";

/// Strapi collection holding attraction entries.
pub const DEFAULT_COLLECTION: &str = "atrakcjes";

/// Default revalidation hint attached to every fetch.
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(3600);

/// Where the CMS lives and how fetched responses may be reused.
///
/// The base URL is passed explicitly to the client and to any consumer that
/// needs absolute media URLs, see [`CmsConfig::media_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    /// Origin of the CMS, e.g. `https://api.expeditionlapland.com`.
    pub base_url: Url,

    /// Collection name under `/api/`.
    pub collection: String,

    /// How long a previously fetched response may be served before the
    /// HTTP layer should refetch. Advisory only.
    pub revalidate: Duration,
}

impl Default for CmsConfig {
    fn default() -> Self {
        // DEFAULT_BASE_URL is a fixed absolute https origin; parsing it cannot fail.
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            collection: DEFAULT_COLLECTION.to_string(),
            revalidate: DEFAULT_REVALIDATE,
        }
    }
}

impl CmsConfig {
    /// Create a config for the given base URL with default collection and TTL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::default().with_base_url(base_url)
    }

    /// Load from `CMS_BASE_URL`, `CMS_COLLECTION` and `CMS_REVALIDATE_SECS`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("CMS_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }
        if let Ok(collection) = env::var("CMS_COLLECTION") {
            config = config.with_collection(collection)?;
        }
        if let Ok(secs) = env::var("CMS_REVALIDATE_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CmsError::Config(format!(
                    "CMS_REVALIDATE_SECS must be a whole number of seconds, got {:?}",
                    secs
                ))
            })?;
            config = config.with_revalidate(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the CMS origin. Must be an absolute `http(s)` URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CmsError::Config(format!(
                "base URL must be http or https, got {}",
                url.scheme()
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        let collection = collection.trim().trim_matches('/');
        if collection.is_empty() {
            return Err(CmsError::Config("collection must not be empty".into()));
        }
        self.collection = collection.to_string();
        Ok(self)
    }

    /// Set the revalidation hint.
    pub fn with_revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }

    /// Absolute URL for a media path returned by the CMS.
    ///
    /// Upload URLs come back relative (`/uploads/...`). Providers that store
    /// files elsewhere return absolute URLs, which pass through unchanged.
    pub fn media_url(&self, path: &str) -> String {
        if Url::parse(path).is_ok() {
            return path.to_string();
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CmsConfig::default();
        assert_eq!(config.base_url.as_str(), "https://api.expeditionlapland.com/");
        assert_eq!(config.collection, "atrakcjes");
        assert_eq!(config.revalidate, Duration::from_secs(3600));
    }

    #[test]
    fn test_default_matches_fallible_constructor() {
        assert_eq!(CmsConfig::new(DEFAULT_BASE_URL).unwrap(), CmsConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = CmsConfig::new("http://localhost:1337")
            .unwrap()
            .with_collection("/attractions/")
            .unwrap()
            .with_revalidate(Duration::from_secs(60));

        assert_eq!(config.base_url.as_str(), "http://localhost:1337/");
        assert_eq!(config.collection, "attractions");
        assert_eq!(config.revalidate, Duration::from_secs(60));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            CmsConfig::new("not a url"),
            Err(CmsError::Config(_))
        ));
        assert!(matches!(
            CmsConfig::new("ftp://example.com"),
            Err(CmsError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_empty_collection() {
        let result = CmsConfig::default().with_collection("  ");
        assert!(matches!(result, Err(CmsError::Config(_))));
    }

    #[test]
    fn test_media_url_joins_relative_paths() {
        let config = CmsConfig::default();
        assert_eq!(
            config.media_url("/uploads/aurora.jpg"),
            "https://api.expeditionlapland.com/uploads/aurora.jpg"
        );
        assert_eq!(
            config.media_url("uploads/aurora.jpg"),
            "https://api.expeditionlapland.com/uploads/aurora.jpg"
        );
    }

    #[test]
    fn test_media_url_keeps_absolute_urls() {
        let config = CmsConfig::default();
        let url = "https://cdn.example.com/aurora.jpg";
        assert_eq!(config.media_url(url), url);
    }
}

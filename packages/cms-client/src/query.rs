//! Request URLs for the Strapi REST API.
//!
//! Query pairs are form-encoded, so slugs containing `&`, `=`, `#` or spaces
//! cannot break out of their parameter.

use url::Url;

use crate::config::CmsConfig;
use crate::error::{CmsError, Result};

/// `{base}/api/{collection}?filters[slug][$eq]={slug}&populate=*`
pub fn attraction_by_slug(config: &CmsConfig, slug: &str) -> Result<Url> {
    let mut url = collection_url(config)?;
    url.query_pairs_mut()
        .append_pair("filters[slug][$eq]", slug)
        .append_pair("populate", "*");
    Ok(url)
}

/// `{base}/api/{collection}?fields[0]=slug`
pub fn slug_list(config: &CmsConfig) -> Result<Url> {
    let mut url = collection_url(config)?;
    url.query_pairs_mut().append_pair("fields[0]", "slug");
    Ok(url)
}

fn collection_url(config: &CmsConfig) -> Result<Url> {
    let mut url = config.base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| CmsError::Config(format!("base URL cannot have a path: {}", config.base_url)))?
        .pop_if_empty()
        .push("api")
        .push(&config.collection);
    Ok(url)
}

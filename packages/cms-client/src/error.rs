//! Error types for the CMS client.
//!
//! These never cross the public lookup boundary: [`crate::CmsClient`] logs them
//! and collapses them into [`crate::Lookup::NotFound`] or an empty slug list.

use thiserror::Error;

/// Result type for CMS client operations.
pub type Result<T> = std::result::Result<T, CmsError>;

/// CMS client errors.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Configuration error (invalid base URL, bad environment value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, DNS failure, body read failure)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the CMS
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON was valid but not a shape we can read a record from
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CmsError {
    fn from(e: reqwest::Error) -> Self {
        CmsError::Network(e.to_string())
    }
}

impl From<url::ParseError> for CmsError {
    fn from(e: url::ParseError) -> Self {
        CmsError::Config(format!("invalid URL: {}", e))
    }
}

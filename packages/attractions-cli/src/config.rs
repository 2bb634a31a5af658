use anyhow::{Context, Result};
use cms_client::CmsConfig;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub cms: CmsConfig,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let cms = CmsConfig::from_env().context("Invalid CMS configuration")?;

        let timeout = match env::var("CMS_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(
                secs.trim()
                    .parse()
                    .context("CMS_TIMEOUT_SECS must be a valid number")?,
            )),
            Err(_) => None,
        };

        Ok(Self { cms, timeout })
    }

    /// HTTP client for talking to the CMS.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to build HTTP client")
    }
}

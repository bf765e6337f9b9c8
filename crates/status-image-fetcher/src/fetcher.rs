//! HTTP fetching of upstream images

use crate::error::{FetchError, Result};
use file_image_cache::CacheKey;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Upstream used when none is configured
pub const DEFAULT_UPSTREAM_URL: &str = "https://http.cat";

/// Request timeout used by [`ImageFetcher::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for fetching images from the upstream source
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
    base_url: String,
}

impl ImageFetcher {
    /// Create a new fetcher with the default 30 second timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new fetcher with a custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(Box::new(e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the upstream image for `key`
    pub fn image_url(&self, key: &CacheKey) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Fetch the image for `key`.
    ///
    /// Any non-2xx answer is an error; nothing is retried.
    pub async fn fetch(&self, key: &CacheKey) -> Result<Vec<u8>> {
        let url = self.image_url(key);
        debug!(url = %url, "Fetching image from upstream");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url = %url, "Upstream refused image");
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let data = response.bytes().await?.to_vec();

        debug!(size = data.len(), url = %url, "Fetched image from upstream");

        Ok(data)
    }
}

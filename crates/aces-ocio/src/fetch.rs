//! Config download.
//!
//! [`ConfigFetcher`] is the seam between the cache and the network so the
//! cache can be exercised without touching it.

use std::time::Duration;

use tracing::debug;

use crate::{OcioError, OcioResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("aces-exr/", env!("CARGO_PKG_VERSION"));

/// Fetches the raw bytes behind a URL.
pub trait ConfigFetcher: Send + Sync {
    /// Downloads `url` in full.
    fn fetch(&self, url: &str) -> OcioResult<Vec<u8>>;
}

/// Blocking HTTP(S) fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> OcioResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| OcioError::Download {
                url: String::new(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Fetcher with [`DEFAULT_TIMEOUT`] and [`DEFAULT_USER_AGENT`].
    pub fn with_defaults() -> OcioResult<Self> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }
}

impl ConfigFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> OcioResult<Vec<u8>> {
        let download_err = |e: reqwest::Error| OcioError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        };

        debug!(url, "downloading OCIO config");
        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(download_err)?;
        Ok(bytes.to_vec())
    }
}

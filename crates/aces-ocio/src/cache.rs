//! On-disk cache of downloaded configs.
//!
//! Files are named `ocio_{hash}_{hint}` where `hash` is the first eight hex
//! digits of the SHA-256 of the URL. A cached file is reused without any
//! network access.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::fetch::ConfigFetcher;
use crate::{OcioError, OcioResult};

/// Payloads below this size are rejected as error pages.
pub const MIN_CONFIG_SIZE: usize = 1000;

/// Download cache for OCIO configs.
#[derive(Clone)]
pub struct ConfigCache {
    dir: PathBuf,
    fetcher: Arc<dyn ConfigFetcher>,
}

impl std::fmt::Debug for ConfigCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigCache").field("dir", &self.dir).finish_non_exhaustive()
    }
}

fn url_hash(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    digest[..4].iter().fold(String::with_capacity(8), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}

impl ConfigCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>, fetcher: Arc<dyn ConfigFetcher>) -> Self {
        Self {
            dir: dir.into(),
            fetcher,
        }
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `url` is cached.
    pub fn cache_path(&self, url: &str, hint: &str) -> PathBuf {
        self.dir.join(format!("ocio_{}_{hint}", url_hash(url)))
    }

    /// Returns the cached file for `url`, downloading it first if needed.
    pub fn get_or_download(&self, url: &str, hint: &str) -> OcioResult<PathBuf> {
        let path = self.cache_path(url, hint);
        if path.is_file() {
            let size = fs::metadata(&path)?.len();
            debug!(path = %path.display(), size, "using cached OCIO config");
            return Ok(path);
        }

        let bytes = self.fetcher.fetch(url)?;
        if bytes.len() < MIN_CONFIG_SIZE {
            return Err(OcioError::TooSmall {
                url: url.to_string(),
                size: bytes.len(),
            });
        }

        fs::create_dir_all(&self.dir)?;
        // A partial file must never look like a hit.
        let partial = path.with_extension("part");
        fs::write(&partial, &bytes)?;
        fs::rename(&partial, &path)?;

        info!(path = %path.display(), size = bytes.len(), "OCIO config downloaded");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        body: Vec<u8>,
        calls: AtomicUsize,
    }

    impl ConfigFetcher for Fixed {
        fn fetch(&self, _url: &str) -> OcioResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn fixed(size: usize) -> Arc<Fixed> {
        Arc::new(Fixed {
            body: vec![b'#'; size],
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_cache_path_format() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path(), fixed(0));
        let path = cache.cache_path("https://example.com/config.ocio", "config.ocio");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("ocio_"));
        assert!(name.ends_with("_config.ocio"));
        let hash = &name[5..13];
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(path.parent().unwrap(), dir.path());

        let other = cache.cache_path("https://example.com/other.ocio", "config.ocio");
        assert_ne!(path, other);
    }

    #[test]
    fn test_download_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fixed(4096);
        let cache = ConfigCache::new(dir.path().join("nested"), fetcher.clone());

        let first = cache.get_or_download("https://example.com/a.ocio", "a.ocio").unwrap();
        assert_eq!(fs::metadata(&first).unwrap().len(), 4096);
        let second = cache.get_or_download("https://example.com/a.ocio", "a.ocio").unwrap();
        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_small_payload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path(), fixed(999));
        let err = cache.get_or_download("https://example.com/404", "x.ocio").unwrap_err();
        assert!(matches!(err, OcioError::TooSmall { size: 999, .. }));
        assert!(!cache.cache_path("https://example.com/404", "x.ocio").exists());
    }

    #[test]
    fn test_minimum_size_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path(), fixed(MIN_CONFIG_SIZE));
        assert!(cache.get_or_download("https://example.com/ok", "ok.ocio").is_ok());
    }
}

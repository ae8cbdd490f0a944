//! Config resolution.
//!
//! The config is informational: resolution never fails an export. Every
//! failure is logged and reported as `None`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::ConfigCache;
use crate::preset::{ConfigSource, Preset};

/// Search-root relative locations checked in `Auto` mode, in order.
pub const AUTO_CANDIDATES: [&str; 4] = [
    "ocio_configs/cg-config-v2.2.0_aces-v1.3_ocio-v2.4.ocio",
    "ocio_configs/studio-config-v2.2.0_aces-v1.3_ocio-v2.4.ocio",
    "ocio_configs/config.ocio",
    "ocio_configs/aces_1.2/config.ocio",
];

/// Cache hint of the `Auto` fallback download.
pub const AUTO_FALLBACK_HINT: &str = "aces13_cg.ocio";

const URL_HINT: &str = "config.ocio";

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRequest {
    /// Selected source.
    pub source: ConfigSource,
    /// Path for [`ConfigSource::LocalPath`].
    pub path: String,
    /// URL for [`ConfigSource::Url`].
    pub url: String,
    /// Preset for [`ConfigSource::Preset`].
    pub preset: Preset,
}

impl ConfigRequest {
    /// Request for `source` with everything else defaulted.
    pub fn new(source: ConfigSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }
}

/// Turns a [`ConfigRequest`] into a config file.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cache: ConfigCache,
    search_root: PathBuf,
    home: Option<PathBuf>,
    env_config: Option<PathBuf>,
}

impl ConfigResolver {
    /// Resolver searching under `search_root`, the home directory and `$OCIO`.
    pub fn new(cache: ConfigCache, search_root: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            search_root: search_root.into(),
            home: dirs::home_dir(),
            env_config: std::env::var_os("OCIO")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Overrides the home directory (`None` skips it).
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Overrides the `$OCIO` value (`None` skips it).
    pub fn with_env_config(mut self, path: Option<PathBuf>) -> Self {
        self.env_config = path;
        self
    }

    /// Download cache.
    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    /// Local files `Auto` mode checks, in order.
    pub fn auto_candidates(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self.env_config.iter().cloned().collect();
        out.extend(AUTO_CANDIDATES.iter().map(|c| self.search_root.join(c)));
        if let Some(home) = &self.home {
            out.push(home.join(AUTO_CANDIDATES[0]));
        }
        out
    }

    /// Resolves `request` to a config file, or `None`.
    pub fn resolve(&self, request: &ConfigRequest) -> Option<PathBuf> {
        match request.source {
            ConfigSource::LocalPath => {
                let path = request.path.trim();
                if path.is_empty() {
                    warn!("OCIO source is Local Path but no path was given");
                    return None;
                }
                let path = Path::new(path);
                if path.is_file() {
                    info!(path = %path.display(), "using local OCIO config");
                    Some(path.to_path_buf())
                } else {
                    warn!(path = %path.display(), "local OCIO config not found");
                    None
                }
            }
            ConfigSource::Url => {
                let url = request.url.trim();
                if url.is_empty() {
                    warn!("OCIO source is URL but no URL was given");
                    return None;
                }
                self.download(url, URL_HINT)
            }
            ConfigSource::Preset => {
                let preset = request.preset;
                debug!(preset = %preset, "resolving OCIO preset");
                self.download(&preset.url(), &preset.cache_hint())
            }
            ConfigSource::Auto => {
                if let Some(found) = self.auto_candidates().into_iter().find(|p| p.is_file()) {
                    info!(path = %found.display(), "found local OCIO config");
                    return Some(found);
                }
                debug!("no local OCIO config, falling back to the ACES 1.3 CG preset");
                self.download(&Preset::Aces13Cg.url(), AUTO_FALLBACK_HINT)
            }
        }
    }

    fn download(&self, url: &str, hint: &str) -> Option<PathBuf> {
        match self.cache.get_or_download(url, hint) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(url, error = %e, "OCIO config unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigFetcher, OcioError, OcioResult};
    use std::fs;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        urls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ConfigFetcher for Recorder {
        fn fetch(&self, url: &str) -> OcioResult<Vec<u8>> {
            self.urls.lock().unwrap().push(url.to_string());
            if self.fail {
                return Err(OcioError::Download {
                    url: url.to_string(),
                    reason: "offline".into(),
                });
            }
            Ok(vec![b' '; 2048])
        }
    }

    fn resolver(root: &Path, fetcher: Arc<Recorder>) -> ConfigResolver {
        ConfigResolver::new(ConfigCache::new(root.join("cache"), fetcher), root)
            .with_home(None)
            .with_env_config(None)
    }

    #[test]
    fn test_local_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("my.ocio");
        fs::write(&file, "ocio_profile_version: 2").unwrap();
        let r = resolver(dir.path(), Arc::default());

        let mut req = ConfigRequest::new(ConfigSource::LocalPath);
        req.path = file.to_string_lossy().into_owned();
        assert_eq!(r.resolve(&req), Some(file));

        req.path = dir.path().join("missing.ocio").to_string_lossy().into_owned();
        assert_eq!(r.resolve(&req), None);

        req.path = "  ".into();
        assert_eq!(r.resolve(&req), None);
    }

    #[test]
    fn test_url_and_preset() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(Recorder::default());
        let r = resolver(dir.path(), fetcher.clone());

        let mut req = ConfigRequest::new(ConfigSource::Url);
        assert_eq!(r.resolve(&req), None);
        req.url = "https://example.com/studio.ocio".into();
        let path = r.resolve(&req).unwrap();
        assert!(path.to_string_lossy().ends_with("_config.ocio"));

        let mut req = ConfigRequest::new(ConfigSource::Preset);
        req.preset = Preset::Aces20Cg;
        let path = r.resolve(&req).unwrap();
        assert!(path.to_string_lossy().ends_with("_aces_2.0_cg_config.ocio"));

        let urls = fetcher.urls.lock().unwrap();
        assert_eq!(urls.as_slice(), [
            "https://example.com/studio.ocio".to_string(),
            Preset::Aces20Cg.url(),
        ]);
    }

    #[test]
    fn test_auto_prefers_env_then_local() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(Recorder::default());
        let local = dir.path().join(AUTO_CANDIDATES[2]);
        fs::create_dir_all(local.parent().unwrap()).unwrap();
        fs::write(&local, "name: local").unwrap();

        let r = resolver(dir.path(), fetcher.clone());
        let auto = ConfigRequest::default();
        assert_eq!(r.resolve(&auto), Some(local.clone()));

        let env = dir.path().join("env.ocio");
        fs::write(&env, "name: env").unwrap();
        let r = r.with_env_config(Some(env.clone()));
        assert_eq!(r.resolve(&auto), Some(env));
        assert!(fetcher.urls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_auto_checks_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let cg = home.join(AUTO_CANDIDATES[0]);
        fs::create_dir_all(cg.parent().unwrap()).unwrap();
        fs::write(&cg, "name: cg").unwrap();

        let r = resolver(&dir.path().join("root"), Arc::default()).with_home(Some(home));
        assert_eq!(r.resolve(&ConfigRequest::default()), Some(cg));
    }

    #[test]
    fn test_auto_falls_back_to_download() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(Recorder::default());
        let r = resolver(dir.path(), fetcher.clone());
        let path = r.resolve(&ConfigRequest::default()).unwrap();
        assert!(path.to_string_lossy().ends_with("_aces13_cg.ocio"));
        assert_eq!(fetcher.urls.lock().unwrap()[0], Preset::Aces13Cg.url());
    }

    #[test]
    fn test_download_failure_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let r = resolver(dir.path(), fetcher);
        assert_eq!(r.resolve(&ConfigRequest::default()), None);
        assert_eq!(r.resolve(&ConfigRequest::new(ConfigSource::Preset)), None);
    }
}

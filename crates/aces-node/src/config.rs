//! Plugin configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ACES_EXR_OUTPUT_DIR` | `./output` |
//! | `ACES_EXR_CACHE_DIR` | `<cache dir>/aces-exr/ocio_cache` |
//! | `ACES_EXR_SEARCH_ROOT` | `.` |
//! | `ACES_EXR_TIMEOUT_SECS` | `30` |

use std::path::PathBuf;
use std::time::Duration;

use aces_ocio::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use tracing::warn;

/// Output directory variable.
pub const ENV_OUTPUT_DIR: &str = "ACES_EXR_OUTPUT_DIR";
/// OCIO cache directory variable.
pub const ENV_CACHE_DIR: &str = "ACES_EXR_CACHE_DIR";
/// OCIO search root variable.
pub const ENV_SEARCH_ROOT: &str = "ACES_EXR_SEARCH_ROOT";
/// Download timeout variable, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ACES_EXR_TIMEOUT_SECS";

/// Where the plugin writes, caches and searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Directory EXR files are written to.
    pub output_dir: PathBuf,
    /// Directory downloaded OCIO configs are cached in.
    pub ocio_cache_dir: PathBuf,
    /// Root of the `ocio_configs/` search in `Auto` mode.
    pub search_root: PathBuf,
    /// Config download timeout.
    pub download_timeout: Duration,
    /// `User-Agent` for config downloads.
    pub user_agent: String,
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("aces-exr")
        .join("ocio_cache")
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            ocio_cache_dir: default_cache_dir(),
            search_root: PathBuf::from("."),
            download_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PluginConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_CACHE_DIR) {
            config.ocio_cache_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_SEARCH_ROOT) {
            config.search_root = PathBuf::from(dir);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.download_timeout = Duration::from_secs(secs),
                Err(_) => warn!(value = %secs, "ignoring invalid {ENV_TIMEOUT_SECS}"),
            }
        }
        config
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the OCIO cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ocio_cache_dir = dir.into();
        self
    }

    /// Sets the OCIO search root.
    pub fn with_search_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_root = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PluginConfig::from_lookup(|_| None);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.search_root, PathBuf::from("."));
        assert_eq!(config.download_timeout, Duration::from_secs(30));
        assert!(config.ocio_cache_dir.ends_with("aces-exr/ocio_cache"));
        assert!(config.user_agent.starts_with("aces-exr/"));
    }

    #[test]
    fn test_overrides() {
        let config = PluginConfig::from_lookup(lookup(&[
            (ENV_OUTPUT_DIR, "/renders"),
            (ENV_CACHE_DIR, "/cache"),
            (ENV_SEARCH_ROOT, "/show"),
            (ENV_TIMEOUT_SECS, "5"),
        ]));
        assert_eq!(config.output_dir, PathBuf::from("/renders"));
        assert_eq!(config.ocio_cache_dir, PathBuf::from("/cache"));
        assert_eq!(config.search_root, PathBuf::from("/show"));
        assert_eq!(config.download_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_values_ignored() {
        let config = PluginConfig::from_lookup(lookup(&[
            (ENV_OUTPUT_DIR, "  "),
            (ENV_TIMEOUT_SECS, "soon"),
        ]));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.download_timeout, DEFAULT_TIMEOUT);
    }
}

//! CLI command implementations

pub mod inspect;
pub mod nodes;
pub mod ocio;
pub mod save;
pub mod version;

use std::path::Path;
use std::sync::Arc;

use aces_core::{Frame, ImageBatch};
use aces_node::{NodeRegistry, PluginConfig, register_plugin};
use aces_ocio::{ConfigCache, ConfigRequest, ConfigResolver, HttpFetcher};
use anyhow::{Context, Result};
use tracing::debug;

use crate::OcioSelection;

/// Registry holding every node of the plugin.
pub fn registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    register_plugin(&mut registry);
    registry
}

/// Environment configuration with command line overrides applied.
pub fn plugin_config(output_dir: Option<&Path>, ocio: &OcioSelection) -> PluginConfig {
    let mut config = PluginConfig::from_env();
    if let Some(dir) = output_dir {
        config.output_dir = dir.to_path_buf();
    }
    if let Some(dir) = &ocio.cache_dir {
        config.ocio_cache_dir = dir.clone();
    }
    if let Some(dir) = &ocio.search_root {
        config.search_root = dir.clone();
    }
    config
}

/// Parses the OCIO flags.
pub fn config_request(ocio: &OcioSelection) -> Result<ConfigRequest> {
    Ok(ConfigRequest {
        source: ocio.source.parse().context("Invalid --ocio-source")?,
        path: ocio.path.clone(),
        url: ocio.url.clone(),
        preset: ocio.preset.parse().context("Invalid --ocio-preset")?,
    })
}

/// Resolver downloading over HTTP.
pub fn resolver(config: &PluginConfig) -> Result<ConfigResolver> {
    let fetcher = HttpFetcher::new(config.download_timeout, &config.user_agent)
        .context("Failed to create HTTP client")?;
    let cache = ConfigCache::new(&config.ocio_cache_dir, Arc::new(fetcher));
    Ok(ConfigResolver::new(cache, &config.search_root))
}

/// Loads an image as float RGB, or RGBA when it has alpha.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, data) = if img.color().has_alpha() {
        (4, img.into_rgba32f().into_raw())
    } else {
        (3, img.into_rgb32f().into_raw())
    };
    debug!(path = %path.display(), width, height, channels, "loaded image");
    Frame::new(width, height, channels, data)
        .with_context(|| format!("Invalid image: {}", path.display()))
}

/// Loads images of identical size as one batch.
pub fn load_batch(paths: &[impl AsRef<Path>]) -> Result<ImageBatch> {
    let frames = paths
        .iter()
        .map(|p| load_frame(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    ImageBatch::from_frames(frames).context("Inputs cannot form one batch")
}

//! # aces-ocio
//!
//! Finding an OpenColorIO config for an ACES export.
//!
//! Pixels are converted with fixed matrices; the config only identifies the
//! color management context the files belong to. A config can come from
//! `$OCIO`, a local path, a URL or one of the official ACES releases
//! ([`Preset`]). Downloads are cached on disk ([`ConfigCache`]).
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aces_ocio::{ConfigCache, ConfigRequest, ConfigResolver, ConfigSource, HttpFetcher, Preset};
//!
//! let cache = ConfigCache::new("/tmp/ocio_cache", Arc::new(HttpFetcher::with_defaults()?));
//! let resolver = ConfigResolver::new(cache, ".");
//! let request = ConfigRequest { source: ConfigSource::Preset, preset: Preset::Aces20Cg, ..Default::default() };
//! if let Some(path) = resolver.resolve(&request) {
//!     println!("{}", path.display());
//! }
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod fetch;
pub mod preset;
pub mod resolve;
pub mod summary;

pub use cache::{ConfigCache, MIN_CONFIG_SIZE};
pub use error::{OcioError, OcioResult};
pub use fetch::{ConfigFetcher, HttpFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use preset::{ConfigSource, Preset};
pub use resolve::{ConfigRequest, ConfigResolver};
pub use summary::ConfigSummary;

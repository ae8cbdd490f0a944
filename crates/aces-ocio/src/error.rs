//! Error types for OCIO config discovery and download.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for OCIO operations.
pub type OcioResult<T> = Result<T, OcioError>;

/// Errors that can occur while locating, fetching or reading a config.
#[derive(Debug, Error)]
pub enum OcioError {
    /// I/O error reading or caching config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    Download {
        /// Requested URL.
        url: String,
        /// Transport or status error.
        reason: String,
    },

    /// Downloaded payload is too small to be a config.
    #[error("downloaded config from {url} is too small ({size} bytes)")]
    TooSmall {
        /// Requested URL.
        url: String,
        /// Payload size in bytes.
        size: usize,
    },

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// Unknown preset, source or other named value.
    #[error("unknown {kind}: '{value}'")]
    UnknownName {
        /// What was being named.
        kind: &'static str,
        /// Offending value.
        value: String,
    },

    /// File is YAML but not an OCIO config.
    #[error("not an OCIO config: {0}")]
    InvalidConfig(String),
}

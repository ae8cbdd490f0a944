//! Error types for EXR I/O.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid frame or option.
    #[error(transparent)]
    Core(#[from] aces_core::Error),

    /// Encoding error reported by the EXR library.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoding error reported by the EXR library.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Attribute name or value cannot be stored in an EXR header.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Feature the EXR encoder cannot provide.
    #[error("feature unavailable: {0}")]
    UnsupportedFeature(String),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

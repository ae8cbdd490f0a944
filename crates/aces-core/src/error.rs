//! Error types for aces-core operations.
//!
//! The [`Error`] enum covers failures while building frames from host
//! tensors and while parsing user-facing option names (color spaces,
//! compression methods, pixel types).
//!
//! # Usage
//!
//! ```rust
//! use aces_core::{Error, Result};
//!
//! fn check_channels(channels: usize) -> Result<()> {
//!     if channels != 3 && channels != 4 {
//!         return Err(Error::unsupported_channels(channels));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling frames and export options.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid frame dimensions.
    ///
    /// Returned when width or height is zero, or the buffer size would
    /// overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is not RGB or RGBA.
    #[error("unsupported channel count: {channels} (expected 3 or 4)")]
    UnsupportedChannels {
        /// Channel count found in the input
        channels: usize,
    },

    /// Sample buffer length does not match the declared shape.
    #[error("buffer length mismatch: expected {expected} samples, got {got}")]
    BufferLength {
        /// Samples implied by the shape
        expected: usize,
        /// Samples actually provided
        got: usize,
    },

    /// Tensor has a rank other than 3 (`[H, W, C]`) or 4 (`[N, H, W, C]`).
    #[error("invalid tensor shape {shape:?}: expected [H, W, C] or [N, H, W, C]")]
    InvalidShape {
        /// Offending shape
        shape: Vec<usize>,
    },

    /// Frame index outside of the batch.
    #[error("frame {index} out of range for batch of {len}")]
    FrameOutOfRange {
        /// Requested index
        index: usize,
        /// Batch length
        len: usize,
    },

    /// A name did not match any known option.
    #[error("unknown {kind}: '{value}'")]
    UnknownName {
        /// Option family ("color space", "compression", ...)
        kind: &'static str,
        /// Value that failed to parse
        value: String,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedChannels`] error.
    #[inline]
    pub fn unsupported_channels(channels: usize) -> Self {
        Self::UnsupportedChannels { channels }
    }

    /// Creates an [`Error::UnknownName`] error.
    #[inline]
    pub fn unknown_name(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            value: value.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this error comes from a bad tensor or frame layout.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. }
                | Self::UnsupportedChannels { .. }
                | Self::BufferLength { .. }
                | Self::InvalidShape { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_message() {
        let err = Error::unknown_name("color space", "XYZ");
        assert_eq!(err.to_string(), "unknown color space: 'XYZ'");
        assert!(!err.is_shape_error());
    }

    #[test]
    fn test_shape_errors() {
        assert!(Error::unsupported_channels(2).is_shape_error());
        assert!(Error::InvalidShape { shape: vec![2, 2] }.is_shape_error());
        let msg = Error::BufferLength { expected: 12, got: 9 }.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("9"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

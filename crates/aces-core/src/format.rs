//! EXR storage options.
//!
//! - [`PixelType`] - per-channel sample type (`half` or `float`)
//! - [`Compression`] - EXR compression method
//!
//! Names match the option strings offered to the host.
//!
//! ```rust
//! use aces_core::format::{Compression, PixelType};
//!
//! let c: Compression = "piz".parse().unwrap();
//! assert!(!c.is_lossy());
//! assert_eq!(PixelType::default().bytes_per_sample(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Sample type of the written channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelType {
    /// 16-bit half-precision float.
    #[default]
    Half,
    /// 32-bit single-precision float.
    Float,
}

impl PixelType {
    /// All pixel types in declaration order.
    pub const ALL: [Self; 2] = [Self::Half, Self::Float];

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Float => "float",
        }
    }

    /// Number of bytes per sample.
    #[inline]
    pub const fn bytes_per_sample(&self) -> usize {
        match self {
            Self::Half => 2,
            Self::Float => 4,
        }
    }

    /// Option names, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half" | "f16" | "16" => Ok(Self::Half),
            "float" | "f32" | "32" => Ok(Self::Float),
            _ => Err(Error::unknown_name("pixel type", s)),
        }
    }
}

/// EXR compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// No compression.
    None,
    /// ZIP, 16 scanlines per block.
    #[default]
    Zip,
    /// ZIP, one scanline per block.
    Zips,
    /// Run-length encoding.
    Rle,
    /// Wavelet, lossless. Good for grainy images.
    Piz,
    /// 24-bit float truncation, lossy for float channels.
    Pxr24,
    /// 4x4 block, lossy, half channels only.
    B44,
    /// B44 with flat-area optimization.
    B44a,
    /// DCT-based, 32 scanlines per block.
    Dwaa,
    /// DCT-based, 256 scanlines per block.
    Dwab,
}

impl Compression {
    /// All methods in declaration order.
    pub const ALL: [Self; 10] = [
        Self::None,
        Self::Zip,
        Self::Zips,
        Self::Rle,
        Self::Piz,
        Self::Pxr24,
        Self::B44,
        Self::B44a,
        Self::Dwaa,
        Self::Dwab,
    ];

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Zip => "zip",
            Self::Zips => "zips",
            Self::Rle => "rle",
            Self::Piz => "piz",
            Self::Pxr24 => "pxr24",
            Self::B44 => "b44",
            Self::B44a => "b44a",
            Self::Dwaa => "dwaa",
            Self::Dwab => "dwab",
        }
    }

    /// Whether decoded pixels may differ from the written ones.
    pub const fn is_lossy(&self) -> bool {
        matches!(
            self,
            Self::Pxr24 | Self::B44 | Self::B44a | Self::Dwaa | Self::Dwab
        )
    }

    /// Option names, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .or(match lower.as_str() {
                "uncompressed" => Some(Self::None),
                "zip16" => Some(Self::Zip),
                "zip1" => Some(Self::Zips),
                _ => None,
            })
            .ok_or_else(|| Error::unknown_name("compression", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_names() {
        for c in Compression::ALL {
            assert_eq!(c.name().parse::<Compression>().unwrap(), c);
        }
        assert_eq!("ZIP1".parse::<Compression>().unwrap(), Compression::Zips);
        assert!("lzw".parse::<Compression>().is_err());
        assert_eq!(Compression::default(), Compression::Zip);
    }

    #[test]
    fn test_lossy() {
        assert!(Compression::B44.is_lossy());
        assert!(Compression::Dwab.is_lossy());
        assert!(!Compression::Rle.is_lossy());
    }

    #[test]
    fn test_pixel_type() {
        assert_eq!("float".parse::<PixelType>().unwrap(), PixelType::Float);
        assert_eq!(PixelType::Float.bytes_per_sample(), 4);
        assert_eq!(PixelType::names(), vec!["half", "float"]);
        assert!("double".parse::<PixelType>().is_err());
    }
}

//! Color space definitions for ACES export.
//!
//! Two enums describe the two ends of an export:
//!
//! - [`InputColorSpace`] - how the host image is encoded (typically sRGB
//!   after a VAE decode)
//! - [`OutputColorSpace`] - the ACES encoding written to disk
//!
//! Both round-trip through their display names, which are also the option
//! strings the export node declares to the host.
//!
//! ```
//! use aces_core::{InputColorSpace, OutputColorSpace};
//!
//! let out: OutputColorSpace = "ACEScg".parse().unwrap();
//! assert_eq!(out.gamut(), "AP1");
//! assert_eq!(InputColorSpace::default().name(), "sRGB");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// D60 white point chromaticity (~6000K, used by ACES).
pub const D60_XY: (f32, f32) = (0.32168, 0.33767);

/// CIE xy chromaticities of an RGB color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticities {
    /// Red primary (x, y)
    pub red: (f32, f32),
    /// Green primary (x, y)
    pub green: (f32, f32),
    /// Blue primary (x, y)
    pub blue: (f32, f32),
    /// White point (x, y)
    pub white: (f32, f32),
}

/// ACES AP0 primaries (ACES2065-1).
pub const ACES_AP0: Chromaticities = Chromaticities {
    red: (0.7347, 0.2653),
    green: (0.0000, 1.0000),
    blue: (0.0001, -0.0770),
    white: D60_XY,
};

/// ACES AP1 primaries (ACEScg).
pub const ACES_AP1: Chromaticities = Chromaticities {
    red: (0.713, 0.293),
    green: (0.165, 0.830),
    blue: (0.128, 0.044),
    white: D60_XY,
};

/// ACES encoding written to the EXR file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputColorSpace {
    /// ACES2065-1: AP0 primaries, linear. Archival and interchange.
    #[default]
    #[serde(rename = "ACES2065-1")]
    Aces2065_1,
    /// ACEScg: AP1 primaries, linear. CG working space.
    #[serde(rename = "ACEScg")]
    AcesCg,
}

impl OutputColorSpace {
    /// All output spaces in declaration order.
    pub const ALL: [Self; 2] = [Self::Aces2065_1, Self::AcesCg];

    /// Canonical name, as used by OCIO configs and the node options.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Aces2065_1 => "ACES2065-1",
            Self::AcesCg => "ACEScg",
        }
    }

    /// Primaries and white point.
    pub const fn chromaticities(&self) -> Chromaticities {
        match self {
            Self::Aces2065_1 => ACES_AP0,
            Self::AcesCg => ACES_AP1,
        }
    }

    /// Gamut label (`AP0` / `AP1`).
    pub const fn gamut(&self) -> &'static str {
        match self {
            Self::Aces2065_1 => "AP0",
            Self::AcesCg => "AP1",
        }
    }

    /// Primaries label written into the `primaries` header attribute.
    pub const fn primaries_label(&self) -> &'static str {
        match self {
            Self::Aces2065_1 => "ACES",
            Self::AcesCg => "ACEScg",
        }
    }

    /// Both ACES encodings use the D60 white point.
    pub const fn white_point_label(&self) -> &'static str {
        "D60"
    }

    /// Both ACES encodings are scene-linear.
    pub const fn transfer_label(&self) -> &'static str {
        "Linear"
    }

    /// The same space seen as an input encoding.
    pub const fn as_input(&self) -> InputColorSpace {
        match self {
            Self::Aces2065_1 => InputColorSpace::Aces2065_1,
            Self::AcesCg => InputColorSpace::AcesCg,
        }
    }

    /// Option names, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl fmt::Display for OutputColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "aces2065-1" | "aces2065" | "ap0" | "aces" => Ok(Self::Aces2065_1),
            "acescg" | "ap1" => Ok(Self::AcesCg),
            _ => Err(Error::unknown_name("output color space", s)),
        }
    }
}

/// Encoding of the image handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputColorSpace {
    /// sRGB primaries with the sRGB transfer curve.
    #[default]
    #[serde(rename = "sRGB")]
    Srgb,
    /// Rec.709 primaries with the BT.709 camera curve.
    #[serde(rename = "Rec.709")]
    Rec709,
    /// sRGB primaries, already linear.
    #[serde(rename = "Linear sRGB")]
    LinearSrgb,
    /// Already ACES2065-1.
    #[serde(rename = "ACES2065-1")]
    Aces2065_1,
    /// Already ACEScg.
    #[serde(rename = "ACEScg")]
    AcesCg,
}

impl InputColorSpace {
    /// All input spaces in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Srgb,
        Self::Rec709,
        Self::LinearSrgb,
        Self::Aces2065_1,
        Self::AcesCg,
    ];

    /// Canonical name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Srgb => "sRGB",
            Self::Rec709 => "Rec.709",
            Self::LinearSrgb => "Linear sRGB",
            Self::Aces2065_1 => "ACES2065-1",
            Self::AcesCg => "ACEScg",
        }
    }

    /// Whether values are already scene-linear.
    pub const fn is_linear(&self) -> bool {
        !matches!(self, Self::Srgb | Self::Rec709)
    }

    /// Option names, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl fmt::Display for InputColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "srgb" => Ok(Self::Srgb),
            "rec.709" | "rec709" | "bt709" | "bt.709" => Ok(Self::Rec709),
            "linear srgb" | "linear_srgb" | "linear-srgb" | "lin_srgb" | "linear" => {
                Ok(Self::LinearSrgb)
            }
            "aces2065-1" | "aces2065" | "ap0" => Ok(Self::Aces2065_1),
            "acescg" | "ap1" => Ok(Self::AcesCg),
            _ => Err(Error::unknown_name("input color space", s)),
        }
    }
}

impl From<OutputColorSpace> for InputColorSpace {
    fn from(cs: OutputColorSpace) -> Self {
        cs.as_input()
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names_roundtrip() {
        for cs in OutputColorSpace::ALL {
            assert_eq!(cs.name().parse::<OutputColorSpace>().unwrap(), cs);
        }
        assert_eq!(
            "aces2065".parse::<OutputColorSpace>().unwrap(),
            OutputColorSpace::Aces2065_1
        );
        assert!("sRGB".parse::<OutputColorSpace>().is_err());
    }

    #[test]
    fn test_input_names_roundtrip() {
        for cs in InputColorSpace::ALL {
            assert_eq!(cs.name().parse::<InputColorSpace>().unwrap(), cs);
        }
        assert_eq!(
            "linear".parse::<InputColorSpace>().unwrap(),
            InputColorSpace::LinearSrgb
        );
    }

    #[test]
    fn test_chromaticities() {
        let ap0 = OutputColorSpace::Aces2065_1.chromaticities();
        assert_eq!(ap0.blue, (0.0001, -0.0770));
        let ap1 = OutputColorSpace::AcesCg.chromaticities();
        assert_eq!(ap1.green, (0.165, 0.830));
        assert_eq!(ap0.white, ap1.white);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OutputColorSpace::Aces2065_1.gamut(), "AP0");
        assert_eq!(OutputColorSpace::Aces2065_1.primaries_label(), "ACES");
        assert_eq!(OutputColorSpace::AcesCg.primaries_label(), "ACEScg");
        assert!(InputColorSpace::AcesCg.is_linear());
        assert!(!InputColorSpace::Rec709.is_linear());
    }

    #[test]
    fn test_default_names() {
        assert_eq!(OutputColorSpace::names(), vec!["ACES2065-1", "ACEScg"]);
        assert_eq!(InputColorSpace::names().len(), 5);
        assert_eq!(OutputColorSpace::default(), OutputColorSpace::Aces2065_1);
    }
}

//! Official ACES OCIO configs and the config source selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{OcioError, OcioResult};

const RELEASES: &str =
    "https://github.com/AcademySoftwareFoundation/OpenColorIO-Config-ACES/releases/download";

/// Config published by the OpenColorIO-Config-ACES project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Preset {
    /// ACES 1.3 CG config.
    #[default]
    #[serde(rename = "ACES 1.3 CG Config")]
    Aces13Cg,
    /// ACES 1.3 Studio config.
    #[serde(rename = "ACES 1.3 Studio Config")]
    Aces13Studio,
    /// ACES 2.0 CG config.
    #[serde(rename = "ACES 2.0 CG Config")]
    Aces20Cg,
    /// ACES 2.0 Studio config.
    #[serde(rename = "ACES 2.0 Studio Config")]
    Aces20Studio,
}

impl Preset {
    /// All presets, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Aces13Cg,
        Self::Aces13Studio,
        Self::Aces20Cg,
        Self::Aces20Studio,
    ];

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Aces13Cg => "ACES 1.3 CG Config",
            Self::Aces13Studio => "ACES 1.3 Studio Config",
            Self::Aces20Cg => "ACES 2.0 CG Config",
            Self::Aces20Studio => "ACES 2.0 Studio Config",
        }
    }

    /// Release file name.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Aces13Cg => "cg-config-v2.2.0_aces-v1.3_ocio-v2.4.ocio",
            Self::Aces13Studio => "studio-config-v2.2.0_aces-v1.3_ocio-v2.4.ocio",
            Self::Aces20Cg => "cg-config-v3.0.0_aces-v2.0_ocio-v2.4.ocio",
            Self::Aces20Studio => "studio-config-v3.0.0_aces-v2.0_ocio-v2.4.ocio",
        }
    }

    const fn release_tag(&self) -> &'static str {
        match self {
            Self::Aces13Cg | Self::Aces13Studio => "v2.1.0-v2.2.0",
            Self::Aces20Cg | Self::Aces20Studio => "v3.0.0",
        }
    }

    /// Download URL.
    pub fn url(&self) -> String {
        format!("{RELEASES}/{}/{}", self.release_tag(), self.file_name())
    }

    /// Cache file suffix, e.g. `aces_1.3_cg_config.ocio`.
    pub fn cache_hint(&self) -> String {
        format!("{}.ocio", self.name().to_lowercase().replace(' ', "_"))
    }

    /// Display names, for choice menus.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = OcioError;

    fn from_str(s: &str) -> OcioResult<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| OcioError::UnknownName {
                kind: "OCIO preset",
                value: s.to_string(),
            })
    }
}

/// Where the config comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConfigSource {
    /// `$OCIO`, local search paths, then the default preset.
    #[default]
    Auto,
    /// A file on disk.
    #[serde(rename = "Local Path")]
    LocalPath,
    /// A config URL.
    #[serde(rename = "URL")]
    Url,
    /// One of the official [`Preset`]s.
    Preset,
}

impl ConfigSource {
    /// All sources, in menu order.
    pub const ALL: [Self; 4] = [Self::Auto, Self::LocalPath, Self::Url, Self::Preset];

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::LocalPath => "Local Path",
            Self::Url => "URL",
            Self::Preset => "Preset",
        }
    }

    /// Display names, for choice menus.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigSource {
    type Err = OcioError;

    fn from_str(s: &str) -> OcioResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "local path" | "local" | "path" => Ok(Self::LocalPath),
            "url" => Ok(Self::Url),
            "preset" => Ok(Self::Preset),
            _ => Err(OcioError::UnknownName {
                kind: "OCIO config source",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_urls() {
        assert_eq!(
            Preset::Aces13Cg.url(),
            "https://github.com/AcademySoftwareFoundation/OpenColorIO-Config-ACES/releases/download/v2.1.0-v2.2.0/cg-config-v2.2.0_aces-v1.3_ocio-v2.4.ocio"
        );
        assert_eq!(
            Preset::Aces20Studio.url(),
            "https://github.com/AcademySoftwareFoundation/OpenColorIO-Config-ACES/releases/download/v3.0.0/studio-config-v3.0.0_aces-v2.0_ocio-v2.4.ocio"
        );
    }

    #[test]
    fn test_cache_hint() {
        assert_eq!(Preset::Aces13Cg.cache_hint(), "aces_1.3_cg_config.ocio");
        assert_eq!(Preset::Aces20Studio.cache_hint(), "aces_2.0_studio_config.ocio");
    }

    #[test]
    fn test_parse_names() {
        for p in Preset::ALL {
            assert_eq!(p.name().parse::<Preset>().unwrap(), p);
        }
        for s in ConfigSource::ALL {
            assert_eq!(s.name().parse::<ConfigSource>().unwrap(), s);
        }
        assert_eq!("aces 2.0 cg config".parse::<Preset>().unwrap(), Preset::Aces20Cg);
        assert!("ACES 3.0".parse::<Preset>().is_err());
        assert!("ftp".parse::<ConfigSource>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Preset::default(), Preset::Aces13Cg);
        assert_eq!(ConfigSource::default(), ConfigSource::Auto);
    }
}

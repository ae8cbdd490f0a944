//! ACES header metadata.
//!
//! [`AcesHeader`] collects everything written next to the pixels: the
//! standard `chromaticities` attribute plus descriptive text attributes that
//! OCIO-aware readers (and humans with `exrheader`) pick up.
//!
//! | Attribute | Example |
//! |-----------|---------|
//! | `oiio:ColorSpace`, `ColorSpace`, `Encoding` | `ACEScg` |
//! | `WhitePoint` | `D60` |
//! | `primaries` | `ACES` / `ACEScg` |
//! | `Gamut` | `AP0` / `AP1` |
//! | `TransferFunction` | `Linear` |
//! | `OriginalRange` | `[0.000000, 3.250000]` |
//! | `HDR`, `MaxLuminance` | only when values exceed 1.0 |

use aces_core::{Chromaticities, Compression, Frame, OutputColorSpace, PixelType};

/// Options for writing one ACES EXR file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExrOptions {
    /// ACES encoding of the pixels.
    pub colorspace: OutputColorSpace,
    /// Compression method.
    pub compression: Compression,
    /// Sample type of every channel.
    pub pixel_type: PixelType,
    /// Value of the `Software` attribute.
    pub software: String,
    /// Value of the `Description` attribute.
    pub description: String,
    /// Additional text attributes, written after the standard ones.
    pub extra: Vec<(String, String)>,
}

impl ExrOptions {
    /// Default options for the given color space.
    pub fn new(colorspace: OutputColorSpace) -> Self {
        Self {
            colorspace,
            compression: Compression::default(),
            pixel_type: PixelType::default(),
            software: format!("aces-exr {}", env!("CARGO_PKG_VERSION")),
            description: format!("ACES {colorspace} EXR written by aces-exr"),
            extra: Vec::new(),
        }
    }

    /// Sets the compression method.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the sample type.
    pub fn with_pixel_type(mut self, pixel_type: PixelType) -> Self {
        self.pixel_type = pixel_type;
        self
    }

    /// Adds a text attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }
}

/// Header attributes computed for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AcesHeader {
    /// Standard `chromaticities` attribute.
    pub chromaticities: Chromaticities,
    /// Text attributes in write order.
    pub text: Vec<(String, String)>,
    /// Integer attributes in write order.
    pub ints: Vec<(String, i32)>,
    /// Sample range of the frame.
    pub range: (f32, f32),
}

impl AcesHeader {
    /// Computes the header for `frame` written with `options`.
    pub fn for_frame(frame: &Frame, options: &ExrOptions) -> Self {
        let cs = options.colorspace;
        let (min, max) = frame.range();

        let mut text: Vec<(String, String)> = [
            ("oiio:ColorSpace", cs.name().to_string()),
            ("ColorSpace", cs.name().to_string()),
            ("Software", options.software.clone()),
            ("Description", options.description.clone()),
            ("WhitePoint", cs.white_point_label().to_string()),
            ("primaries", cs.primaries_label().to_string()),
            ("Encoding", cs.name().to_string()),
            ("TransferFunction", cs.transfer_label().to_string()),
            ("Gamut", cs.gamut().to_string()),
            ("OriginalRange", format!("[{min:.6}, {max:.6}]")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        if max > 1.0 {
            text.push(("HDR".to_string(), "true".to_string()));
            text.push(("MaxLuminance".to_string(), format!("{max:.3}")));
        }

        text.extend(options.extra.iter().cloned());

        // SMPTE ST 2065-4 container: AP0 pixels, no compression.
        let mut ints = Vec::new();
        if cs == OutputColorSpace::Aces2065_1 && options.compression == Compression::None {
            ints.push(("acesImageContainerFlag".to_string(), 1));
        }

        Self {
            chromaticities: cs.chromaticities(),
            text,
            ints,
            range: (min, max),
        }
    }

    /// Looks up a text attribute. Later entries win.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.text
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acescg_header() {
        let frame = Frame::filled(2, 2, &[0.1, 0.5, 0.9]).unwrap();
        let header = AcesHeader::for_frame(&frame, &ExrOptions::new(OutputColorSpace::AcesCg));
        assert_eq!(header.get("ColorSpace"), Some("ACEScg"));
        assert_eq!(header.get("oiio:ColorSpace"), Some("ACEScg"));
        assert_eq!(header.get("Gamut"), Some("AP1"));
        assert_eq!(header.get("primaries"), Some("ACEScg"));
        assert_eq!(header.get("WhitePoint"), Some("D60"));
        assert_eq!(header.get("OriginalRange"), Some("[0.100000, 0.900000]"));
        assert_eq!(header.get("HDR"), None);
        assert_eq!(header.chromaticities.red, (0.713, 0.293));
        assert!(header.ints.is_empty());
    }

    #[test]
    fn test_hdr_attributes() {
        let frame = Frame::filled(1, 1, &[0.0, 1.0, 12.5]).unwrap();
        let header = AcesHeader::for_frame(&frame, &ExrOptions::new(OutputColorSpace::Aces2065_1));
        assert_eq!(header.get("HDR"), Some("true"));
        assert_eq!(header.get("MaxLuminance"), Some("12.500"));
        assert_eq!(header.get("primaries"), Some("ACES"));
    }

    #[test]
    fn test_container_flag_only_uncompressed_ap0() {
        let frame = Frame::filled(1, 1, &[0.5, 0.5, 0.5]).unwrap();
        let ap0 = ExrOptions::new(OutputColorSpace::Aces2065_1).with_compression(Compression::None);
        let header = AcesHeader::for_frame(&frame, &ap0);
        assert_eq!(header.ints, vec![("acesImageContainerFlag".to_string(), 1)]);

        let zipped = ap0.clone().with_compression(Compression::Zip);
        assert!(AcesHeader::for_frame(&frame, &zipped).ints.is_empty());

        let cg = ExrOptions::new(OutputColorSpace::AcesCg).with_compression(Compression::None);
        assert!(AcesHeader::for_frame(&frame, &cg).ints.is_empty());
    }

    #[test]
    fn test_extra_attributes_override() {
        let frame = Frame::filled(1, 1, &[0.5, 0.5, 0.5]).unwrap();
        let opts = ExrOptions::new(OutputColorSpace::AcesCg)
            .with_attribute("aces:Node", "ACESEXRSaveOCIO")
            .with_attribute("Gamut", "custom");
        let header = AcesHeader::for_frame(&frame, &opts);
        assert_eq!(header.get("aces:Node"), Some("ACESEXRSaveOCIO"));
        assert_eq!(header.get("Gamut"), Some("custom"));
    }
}

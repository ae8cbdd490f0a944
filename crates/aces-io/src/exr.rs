//! OpenEXR writing and header inspection.
//!
//! Pixel encoding and compression are done by the `exr` crate. This module
//! maps a [`Frame`] and an [`ExrOptions`] onto a single-part scanline image
//! with `R`, `G`, `B` (and `A`) channels and an ACES header.
//!
//! # Example
//!
//! ```rust,ignore
//! use aces_core::{Frame, OutputColorSpace, PixelType};
//! use aces_io::{write_exr, ExrOptions};
//!
//! let frame = Frame::filled(64, 64, &[0.18, 0.18, 0.18])?;
//! let opts = ExrOptions::new(OutputColorSpace::AcesCg).with_pixel_type(PixelType::Float);
//! let summary = write_exr("grey.exr", &frame, &opts)?;
//! println!("{}", summary.describe());
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aces_core::{Chromaticities, Compression, Frame, OutputColorSpace, PixelType};
use exr::image::write::WritableImage;
use exr::image::{AnyChannel, AnyChannels, Encoding, FlatSamples, Image, Layer};
use exr::math::Vec2;
use exr::meta::MetaData;
use exr::meta::attribute::{
    AttributeValue, Chromaticities as ExrChromaticities, Compression as ExrCompression, SampleType,
    Text,
};
use exr::meta::header::LayerAttributes;
use half::f16;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::metadata::{AcesHeader, ExrOptions};
use crate::{IoError, IoResult};

const RGBA_NAMES: [&str; 4] = ["R", "G", "B", "A"];

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    /// File that was written.
    pub path: PathBuf,
    /// ACES encoding of the file.
    pub colorspace: OutputColorSpace,
    /// Sample type used.
    pub pixel_type: PixelType,
    /// Compression used.
    pub compression: Compression,
    /// Width, height.
    pub size: (usize, usize),
    /// Channels written.
    pub channels: usize,
    /// Minimum and maximum sample value.
    pub range: (f32, f32),
}

impl WriteSummary {
    /// One-line description, e.g. `EXR ACEScg (half, zip, range: [0.000, 1.250])`.
    pub fn describe(&self) -> String {
        format!(
            "EXR {} ({}, {}, range: [{:.3}, {:.3}])",
            self.colorspace, self.pixel_type, self.compression, self.range.0, self.range.1
        )
    }
}

/// Maps a compression method onto the encoder's enum.
///
/// DWAA and DWAB can be read but not written by the encoder.
pub fn to_exr_compression(compression: Compression) -> IoResult<ExrCompression> {
    Ok(match compression {
        Compression::None => ExrCompression::Uncompressed,
        Compression::Zip => ExrCompression::ZIP16,
        Compression::Zips => ExrCompression::ZIP1,
        Compression::Rle => ExrCompression::RLE,
        Compression::Piz => ExrCompression::PIZ,
        Compression::Pxr24 => ExrCompression::PXR24,
        Compression::B44 => ExrCompression::B44,
        Compression::B44a => ExrCompression::B44A,
        Compression::Dwaa | Compression::Dwab => {
            return Err(IoError::UnsupportedFeature(format!(
                "{compression} compression cannot be written by the EXR encoder"
            )));
        }
    })
}

/// Maps the encoder's compression back, for inspection.
///
/// Methods with no [`Compression`] counterpart give `None`.
#[allow(unreachable_patterns)]
pub fn from_exr_compression(compression: ExrCompression) -> Option<Compression> {
    Some(match compression {
        ExrCompression::Uncompressed => Compression::None,
        ExrCompression::RLE => Compression::Rle,
        ExrCompression::ZIP1 => Compression::Zips,
        ExrCompression::ZIP16 => Compression::Zip,
        ExrCompression::PIZ => Compression::Piz,
        ExrCompression::PXR24 => Compression::Pxr24,
        ExrCompression::B44 => Compression::B44,
        ExrCompression::B44A => Compression::B44a,
        ExrCompression::DWAA(_) => Compression::Dwaa,
        ExrCompression::DWAB(_) => Compression::Dwab,
        _ => return None,
    })
}

/// Whether `value` can be stored as a header text attribute (Latin-1 only).
pub fn is_header_text(value: &str) -> bool {
    Text::new_or_none(value).is_some()
}

fn text(value: &str) -> IoResult<Text> {
    Text::new_or_none(value)
        .ok_or_else(|| IoError::InvalidAttribute(format!("'{value}' is not latin-1 text")))
}

fn exr_chromaticities(c: &Chromaticities) -> ExrChromaticities {
    ExrChromaticities {
        red: Vec2(c.red.0, c.red.1),
        green: Vec2(c.green.0, c.green.1),
        blue: Vec2(c.blue.0, c.blue.1),
        white: Vec2(c.white.0, c.white.1),
    }
}

fn channel_samples(frame: &Frame, index: usize, pixel_type: PixelType) -> FlatSamples {
    let values = frame.channel(index);
    match pixel_type {
        PixelType::Half => FlatSamples::F16(values.into_iter().map(f16::from_f32).collect()),
        PixelType::Float => FlatSamples::F32(values),
    }
}

/// Writes `frame` as an ACES EXR file.
///
/// The header carries the standard `chromaticities` attribute of the
/// chosen ACES space plus the text attributes of [`AcesHeader`].
pub fn write_exr<P: AsRef<Path>>(
    path: P,
    frame: &Frame,
    options: &ExrOptions,
) -> IoResult<WriteSummary> {
    let path = path.as_ref();
    let compression = to_exr_compression(options.compression)?;
    let header = AcesHeader::for_frame(frame, options);

    trace!(
        path = %path.display(),
        colorspace = %options.colorspace,
        pixel_type = %options.pixel_type,
        compression = %options.compression,
        "write_exr"
    );

    let channels: SmallVec<[AnyChannel<FlatSamples>; 4]> = RGBA_NAMES[..frame.channels()]
        .iter()
        .enumerate()
        .map(|(i, name)| AnyChannel::new(*name, channel_samples(frame, i, options.pixel_type)))
        .collect();

    let mut layer_attributes = LayerAttributes::default();
    layer_attributes.software_name = Some(text(&options.software)?);

    let layer = Layer::new(
        (frame.width(), frame.height()),
        layer_attributes,
        Encoding {
            compression,
            ..Encoding::UNCOMPRESSED
        },
        AnyChannels::sort(channels),
    );

    let mut image = Image::from_layer(layer);
    image.attributes.chromaticities = Some(exr_chromaticities(&header.chromaticities));
    for (name, value) in &header.text {
        image
            .attributes
            .other
            .insert(text(name)?, AttributeValue::Text(text(value)?));
    }
    for (name, value) in &header.ints {
        image
            .attributes
            .other
            .insert(text(name)?, AttributeValue::I32(*value));
    }

    image
        .write()
        .to_file(path)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(path = %path.display(), range = ?header.range, "EXR written");

    Ok(WriteSummary {
        path: path.to_path_buf(),
        colorspace: options.colorspace,
        pixel_type: options.pixel_type,
        compression: options.compression,
        size: (frame.width(), frame.height()),
        channels: frame.channels(),
        range: header.range,
    })
}

/// Header fields of an EXR file, for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ExrHeaderInfo {
    /// Width, height of the first part.
    pub size: (usize, usize),
    /// Channel names and sample types.
    pub channels: Vec<(String, PixelType)>,
    /// Compression of the first part, `None` when it is not one we write.
    pub compression: Option<Compression>,
    /// Standard chromaticities, when present.
    pub chromaticities: Option<Chromaticities>,
    /// Text attributes by name.
    pub text: BTreeMap<String, String>,
    /// Integer attributes by name.
    pub ints: BTreeMap<String, i32>,
}

impl ExrHeaderInfo {
    /// The ACES space named in the header, if it is one of ours.
    pub fn colorspace(&self) -> Option<OutputColorSpace> {
        self.text
            .get("ColorSpace")
            .or_else(|| self.text.get("oiio:ColorSpace"))
            .and_then(|name| name.parse().ok())
    }
}

fn from_exr_chromaticities(c: &ExrChromaticities) -> Chromaticities {
    Chromaticities {
        red: (c.red.0, c.red.1),
        green: (c.green.0, c.green.1),
        blue: (c.blue.0, c.blue.1),
        white: (c.white.0, c.white.1),
    }
}

/// Reads the header of the first part of an EXR file.
pub fn read_header<P: AsRef<Path>>(path: P) -> IoResult<ExrHeaderInfo> {
    let path = path.as_ref();
    let meta = MetaData::read_from_file(path, false)
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let header = meta
        .headers
        .first()
        .ok_or_else(|| IoError::DecodeError(format!("{} has no headers", path.display())))?;

    let channels = header
        .channels
        .list
        .iter()
        .map(|c| {
            let pixel_type = match c.sample_type {
                SampleType::F16 => PixelType::Half,
                _ => PixelType::Float,
            };
            (c.name.to_string(), pixel_type)
        })
        .collect();

    let mut chromaticities = header
        .shared_attributes
        .chromaticities
        .as_ref()
        .map(from_exr_chromaticities);
    let mut text = BTreeMap::new();
    let mut ints = BTreeMap::new();

    let custom = header
        .shared_attributes
        .other
        .iter()
        .chain(header.own_attributes.other.iter());
    for (name, value) in custom {
        match value {
            AttributeValue::Text(t) => {
                text.insert(name.to_string(), t.to_string());
            }
            AttributeValue::I32(v) => {
                ints.insert(name.to_string(), *v);
            }
            AttributeValue::Chromaticities(c) if chromaticities.is_none() => {
                chromaticities = Some(from_exr_chromaticities(c));
            }
            _ => {}
        }
    }
    if let Some(software) = &header.own_attributes.software_name {
        text.entry("software".to_string())
            .or_insert_with(|| software.to_string());
    }

    Ok(ExrHeaderInfo {
        size: (header.layer_size.0, header.layer_size.1),
        channels,
        compression: from_exr_compression(header.compression),
        chromaticities,
        text,
        ints,
    })
}

//! # aces-io
//!
//! OpenEXR output for ACES frames.
//!
//! EXR encoding is delegated to the `exr` crate; this crate decides what
//! goes into the file: channel layout, sample type, compression and the
//! ACES header (see [`metadata`]).
//!
//! ```rust,ignore
//! use aces_core::{Frame, OutputColorSpace};
//! use aces_io::{read_header, write_exr, ExrOptions};
//!
//! let frame = Frame::filled(8, 8, &[0.18, 0.18, 0.18])?;
//! write_exr("grey.exr", &frame, &ExrOptions::new(OutputColorSpace::Aces2065_1))?;
//! assert_eq!(read_header("grey.exr")?.colorspace(), Some(OutputColorSpace::Aces2065_1));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod exr;
pub mod metadata;

pub use crate::error::{IoError, IoResult};
pub use crate::exr::{is_header_text, read_header, write_exr, ExrHeaderInfo, WriteSummary};
pub use crate::metadata::{AcesHeader, ExrOptions};

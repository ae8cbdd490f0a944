//! # aces-core
//!
//! Core types shared by every aces-exr crate.
//!
//! - [`OutputColorSpace`], [`InputColorSpace`] - the ACES targets and the
//!   encodings a host image may arrive in
//! - [`PixelType`], [`Compression`] - EXR storage options
//! - [`Frame`], [`ImageBatch`] - in-memory image tensors handed over by the host
//! - [`Error`] - shared error type
//!
//! ## Crate Structure
//!
//! ```text
//! aces-core (this crate)
//!    ^
//!    |
//!    +-- aces-color (transfer functions, ACES matrices)
//!    +-- aces-io (EXR writing with ACES metadata)
//!    +-- aces-node (host plugin and export node)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod format;
pub mod image;

pub use colorspace::*;
pub use error::*;
pub use format::*;
pub use image::*;

/// Prelude module for convenient imports.
///
/// ```
/// use aces_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::{Chromaticities, InputColorSpace, OutputColorSpace};
    pub use crate::error::{Error, Result};
    pub use crate::format::{Compression, PixelType};
    pub use crate::image::{Frame, ImageBatch};
}

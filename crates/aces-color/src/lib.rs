//! # aces-color
//!
//! Color conversion from host image encodings into ACES.
//!
//! The conversions are plain matrix chains: decode the transfer curve (for
//! sRGB and Rec.709 inputs), move sRGB primaries into AP0, and optionally
//! from AP0 into AP1. No rendering transforms (RRT/ODT) are involved.
//!
//! ```text
//! sRGB ──eotf──> Linear sRGB ──M──> ACES2065-1 (AP0) ──M──> ACEScg (AP1)
//! Rec.709 ─eotf─┘                            ^                   │
//!                                            └───────M───────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use aces_color::ConversionPlan;
//! use aces_core::{Frame, InputColorSpace, OutputColorSpace};
//!
//! let plan = ConversionPlan::new(InputColorSpace::Srgb, OutputColorSpace::AcesCg);
//! assert_eq!(plan.description(), "Matrix: sRGB -> Linear -> ACES2065-1 -> ACEScg");
//!
//! let mut frame = Frame::filled(4, 4, &[0.5, 0.5, 0.5]).unwrap();
//! plan.apply(&mut frame);
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod matrix;
pub mod transfer;

pub use convert::{ConversionPlan, Transfer};
pub use matrix::{ACES2065_TO_ACESCG, ACESCG_TO_ACES2065, SRGB_TO_ACES2065};

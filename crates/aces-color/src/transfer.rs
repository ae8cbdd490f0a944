//! Transfer functions (OETF/EOTF) for the supported display encodings.
//!
//! - **EOTF**: encoded -> linear
//! - **OETF**: linear -> encoded
//!
//! Only the inverse direction is used during export; the forward curves
//! are kept for tests and for callers that preview ACES data.

/// sRGB transfer function (IEC 61966-2-1:1999).
pub mod srgb {
    /// sRGB EOTF: decodes sRGB encoded values to linear light.
    ///
    /// ```text
    /// if V <= 0.04045:
    ///     L = V / 12.92
    /// else:
    ///     L = ((V + 0.055) / 1.055)^2.4
    /// ```
    ///
    /// ```rust
    /// use aces_color::transfer::srgb::eotf;
    ///
    /// let linear = eotf(0.5);
    /// assert!((linear - 0.214).abs() < 0.01);
    /// ```
    #[inline]
    pub fn eotf(v: f32) -> f32 {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// sRGB OETF: encodes linear light to sRGB.
    #[inline]
    pub fn oetf(l: f32) -> f32 {
        if l <= 0.0031308 {
            l * 12.92
        } else {
            1.055 * l.powf(1.0 / 2.4) - 0.055
        }
    }
}

/// Rec.709 (ITU-R BT.709-6) camera transfer function.
///
/// The inverse OETF is used to linearize, not BT.1886.
pub mod rec709 {
    /// Rec.709 inverse OETF: decodes Rec.709 to linear.
    #[inline]
    pub fn eotf(v: f32) -> f32 {
        if v < 0.081 {
            v / 4.5
        } else {
            ((v + 0.099) / 1.099).powf(1.0 / 0.45)
        }
    }

    /// Rec.709 OETF: encodes linear to Rec.709.
    #[inline]
    pub fn oetf(l: f32) -> f32 {
        if l < 0.018 {
            4.5 * l
        } else {
            1.099 * l.powf(0.45) - 0.099
        }
    }
}

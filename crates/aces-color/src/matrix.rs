//! Pre-computed ACES gamut matrices.
//!
//! Stored row-major and applied to column RGB vectors:
//!
//! ```text
//! | m00 m01 m02 |   | r |
//! | m10 m11 m12 | * | g |
//! | m20 m21 m22 |   | b |
//! ```

use glam::{Mat3, Vec3};

/// Linear sRGB / Rec.709 (D65) to ACES2065-1 (AP0, D60), Bradford adapted.
pub const SRGB_TO_ACES2065: [[f32; 3]; 3] = [
    [0.4395677, 0.3831666, 0.1772656],
    [0.0897923, 0.8134201, 0.0967876],
    [0.0175439, 0.1115623, 0.8708938],
];

/// ACES2065-1 (AP0) to ACEScg (AP1).
pub const ACES2065_TO_ACESCG: [[f32; 3]; 3] = [
    [1.451439316, -0.236510746, -0.214928570],
    [-0.076553773, 1.176229700, -0.099675927],
    [0.008316148, -0.006032449, 0.997716301],
];

/// ACEScg (AP1) to ACES2065-1 (AP0).
pub const ACESCG_TO_ACES2065: [[f32; 3]; 3] = [
    [0.6954522414, 0.1406786965, 0.1638690622],
    [0.0447945634, 0.8596711185, 0.0955343182],
    [-0.0055258826, 0.0040252103, 1.0015006723],
];

/// Builds a glam matrix from row arrays.
#[inline]
pub fn from_rows(rows: &[[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols_array_2d(rows).transpose()
}

/// Applies a matrix to an RGB triplet.
#[inline]
pub fn transform(m: &Mat3, rgb: [f32; 3]) -> [f32; 3] {
    (*m * Vec3::from_array(rgb)).to_array()
}

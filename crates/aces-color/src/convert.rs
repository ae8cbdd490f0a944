//! Conversion planning from a host encoding into an ACES encoding.
//!
//! A [`ConversionPlan`] is built once per export and applied to every
//! frame. It records the path it takes so the export can report it.

use aces_core::{Frame, InputColorSpace, OutputColorSpace};
use glam::Mat3;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::matrix::{self, ACES2065_TO_ACESCG, ACESCG_TO_ACES2065, SRGB_TO_ACES2065};
use crate::transfer::{rec709, srgb};

/// Transfer curve removed before the gamut matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// sRGB piecewise curve.
    Srgb,
    /// BT.709 camera curve.
    Rec709,
}

impl Transfer {
    /// Decodes one encoded value to linear.
    #[inline]
    pub fn decode(&self, v: f32) -> f32 {
        match self {
            Self::Srgb => srgb::eotf(v),
            Self::Rec709 => rec709::eotf(v),
        }
    }
}

/// Ordered conversion from an input encoding to an ACES output.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    input: InputColorSpace,
    output: OutputColorSpace,
    decode: Option<Transfer>,
    matrix: Option<Mat3>,
    path: Vec<&'static str>,
}

impl ConversionPlan {
    /// Plans the conversion from `input` to `output`.
    pub fn new(input: InputColorSpace, output: OutputColorSpace) -> Self {
        let mut plan = Self {
            input,
            output,
            decode: None,
            matrix: None,
            path: vec![input.name()],
        };

        if input == output.as_input() {
            return plan;
        }

        match input {
            InputColorSpace::Srgb => {
                plan.push_decode(Transfer::Srgb);
                plan.push_matrix(&SRGB_TO_ACES2065, "ACES2065-1");
            }
            InputColorSpace::Rec709 => {
                plan.push_decode(Transfer::Rec709);
                plan.push_matrix(&SRGB_TO_ACES2065, "ACES2065-1");
            }
            InputColorSpace::LinearSrgb => {
                plan.push_matrix(&SRGB_TO_ACES2065, "ACES2065-1");
            }
            InputColorSpace::AcesCg => {
                plan.push_matrix(&ACESCG_TO_ACES2065, "ACES2065-1");
            }
            InputColorSpace::Aces2065_1 => {}
        }

        if output == OutputColorSpace::AcesCg {
            plan.push_matrix(&ACES2065_TO_ACESCG, "ACEScg");
        }

        debug!(input = %input, output = %output, path = %plan.description(), "planned conversion");
        plan
    }

    fn push_decode(&mut self, transfer: Transfer) {
        self.decode = Some(transfer);
        self.path.push("Linear");
    }

    fn push_matrix(&mut self, rows: &[[f32; 3]; 3], label: &'static str) {
        let m = matrix::from_rows(rows);
        // Later steps multiply on the left.
        self.matrix = Some(match self.matrix {
            Some(prev) => m * prev,
            None => m,
        });
        self.path.push(label);
    }

    /// Source encoding.
    pub fn input(&self) -> InputColorSpace {
        self.input
    }

    /// Target encoding.
    pub fn output(&self) -> OutputColorSpace {
        self.output
    }

    /// Whether the plan leaves pixels untouched.
    pub fn is_identity(&self) -> bool {
        self.decode.is_none() && self.matrix.is_none()
    }

    /// Human-readable path, e.g. `Matrix: sRGB -> Linear -> ACES2065-1`.
    pub fn description(&self) -> String {
        if self.is_identity() {
            "No conversion".to_string()
        } else {
            format!("Matrix: {}", self.path.join(" -> "))
        }
    }

    /// Converts one RGB triplet.
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        let rgb = match self.decode {
            Some(t) => rgb.map(|v| t.decode(v)),
            None => rgb,
        };
        match &self.matrix {
            Some(m) => matrix::transform(m, rgb),
            None => rgb,
        }
    }

    /// Converts the RGB channels of every pixel in place. Alpha is untouched.
    pub fn apply(&self, frame: &mut Frame) {
        if self.is_identity() {
            return;
        }
        trace!(
            width = frame.width(),
            height = frame.height(),
            path = %self.description(),
            "converting frame"
        );
        let channels = frame.channels();
        frame.par_rows_mut().for_each(|row| {
            for px in row.chunks_exact_mut(channels) {
                let out = self.apply_rgb([px[0], px[1], px[2]]);
                px[..3].copy_from_slice(&out);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_descriptions() {
        use InputColorSpace as I;
        use OutputColorSpace as O;
        let cases = [
            (I::Srgb, O::Aces2065_1, "Matrix: sRGB -> Linear -> ACES2065-1"),
            (I::Srgb, O::AcesCg, "Matrix: sRGB -> Linear -> ACES2065-1 -> ACEScg"),
            (I::Rec709, O::Aces2065_1, "Matrix: Rec.709 -> Linear -> ACES2065-1"),
            (I::LinearSrgb, O::Aces2065_1, "Matrix: Linear sRGB -> ACES2065-1"),
            (I::LinearSrgb, O::AcesCg, "Matrix: Linear sRGB -> ACES2065-1 -> ACEScg"),
            (I::Aces2065_1, O::AcesCg, "Matrix: ACES2065-1 -> ACEScg"),
            (I::AcesCg, O::Aces2065_1, "Matrix: ACEScg -> ACES2065-1"),
            (I::AcesCg, O::AcesCg, "No conversion"),
            (I::Aces2065_1, O::Aces2065_1, "No conversion"),
        ];
        for (input, output, expected) in cases {
            assert_eq!(ConversionPlan::new(input, output).description(), expected);
        }
    }

    #[test]
    fn test_srgb_white_stays_white() {
        for output in OutputColorSpace::ALL {
            let plan = ConversionPlan::new(InputColorSpace::Srgb, output);
            for c in plan.apply_rgb([1.0, 1.0, 1.0]) {
                assert_abs_diff_eq!(c, 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_srgb_mid_grey() {
        let plan = ConversionPlan::new(InputColorSpace::Srgb, OutputColorSpace::Aces2065_1);
        let grey = srgb::eotf(0.5);
        for c in plan.apply_rgb([0.5, 0.5, 0.5]) {
            assert_abs_diff_eq!(c, grey, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_two_step_matches_sequential() {
        let direct = ConversionPlan::new(InputColorSpace::Srgb, OutputColorSpace::AcesCg);
        let first = ConversionPlan::new(InputColorSpace::Srgb, OutputColorSpace::Aces2065_1);
        let second = ConversionPlan::new(InputColorSpace::Aces2065_1, OutputColorSpace::AcesCg);
        let rgb = [0.8, 0.2, 0.05];
        let a = direct.apply_rgb(rgb);
        let b = second.apply_rgb(first.apply_rgb(rgb));
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_acescg_roundtrip() {
        let to_cg = ConversionPlan::new(InputColorSpace::Aces2065_1, OutputColorSpace::AcesCg);
        let to_ap0 = ConversionPlan::new(InputColorSpace::AcesCg, OutputColorSpace::Aces2065_1);
        let rgb = [0.18, 2.5, 0.02];
        let back = to_ap0.apply_rgb(to_cg.apply_rgb(rgb));
        for (x, y) in rgb.iter().zip(back.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_apply_keeps_alpha() {
        let mut frame = Frame::filled(3, 2, &[1.0, 0.0, 0.0, 0.25]).unwrap();
        let plan = ConversionPlan::new(InputColorSpace::LinearSrgb, OutputColorSpace::Aces2065_1);
        plan.apply(&mut frame);
        let px = frame.pixel(1, 1).unwrap();
        assert_abs_diff_eq!(px[0], 0.4395677, epsilon = 1e-6);
        assert_abs_diff_eq!(px[1], 0.0897923, epsilon = 1e-6);
        assert_abs_diff_eq!(px[3], 0.25);
    }

    #[test]
    fn test_identity_is_noop() {
        let mut frame = Frame::filled(2, 2, &[0.3, 0.6, 0.9]).unwrap();
        let before = frame.clone();
        let plan = ConversionPlan::new(InputColorSpace::AcesCg, OutputColorSpace::AcesCg);
        assert!(plan.is_identity());
        assert_eq!(plan.input(), InputColorSpace::AcesCg);
        assert_eq!(plan.output(), OutputColorSpace::AcesCg);
        plan.apply(&mut frame);
        assert_eq!(frame, before);
    }
}

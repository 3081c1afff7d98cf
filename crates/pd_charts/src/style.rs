//! Shared presentation values: palette, line dashes, height scale, and the
//! fixed 3D camera.

use serde::Serialize;

/// Outcome colors used across every chart type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub positive: String,
    pub negative: String,
    pub total: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            positive: "#00B050".to_string(),
            negative: "#FF4B4B".to_string(),
            total: "#9966CC".to_string(),
        }
    }
}

/// Wireframe color for cuboid edges.
pub const EDGE_COLOR: &str = "rgba(50, 50, 50, 0.8)";

/// Height transform for the 3D value axis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightScale {
    #[default]
    Linear,
    /// `ln(1 + v)`; zero stays zero.
    Log1p,
}

impl HeightScale {
    pub fn apply(self, value: u64) -> f64 {
        match self {
            HeightScale::Linear => value as f64,
            HeightScale::Log1p => {
                if value > 0 {
                    (value as f64).ln_1p()
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// 3D scene camera. Built through [`Camera::default_view`] only, so the
/// initial render and every reset use bit-identical values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    pub eye: [f64; 3],
    pub up: [f64; 3],
    pub center: [f64; 3],
    pub projection: Projection,
}

impl Camera {
    pub fn default_view() -> Self {
        Self {
            eye: [1.25, 0.3, 2.3],
            up: [0.0, 1.0, 0.0],
            center: [0.0, 0.0, 0.0],
            projection: Projection::Perspective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_resets_are_bit_identical() {
        assert_eq!(Camera::default_view(), Camera::default_view());
        let cam = Camera::default_view();
        assert_eq!(cam.eye, [1.25, 0.3, 2.3]);
        assert_eq!(cam.up, [0.0, 1.0, 0.0]);
        assert_eq!(cam.center, [0.0, 0.0, 0.0]);
        assert_eq!(cam.projection, Projection::Perspective);
    }

    #[test]
    fn log1p_scale_keeps_zero_at_zero() {
        assert_eq!(HeightScale::Log1p.apply(0), 0.0);
        assert!((HeightScale::Log1p.apply(9) - 10f64.ln()).abs() < 1e-12);
        assert_eq!(HeightScale::Linear.apply(7), 7.0);
    }
}

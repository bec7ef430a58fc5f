//! Easing curves
//!
//! Curve selection for the navigation transport. Timing and playback belong
//! to the transport; the core only names the shape a transition should use.

use serde::{Deserialize, Serialize};

/// Easing curve type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EaseCurve {
    /// Linear ramp
    Linear,
    /// Quadratic ease-in (slow start)
    EaseInQuad,
    /// Quadratic ease-out (slow end)
    EaseOutQuad,
    /// Quadratic ease-in-out, the site-wide default
    #[default]
    EaseInOutQuad,
    /// Cubic ease-in
    EaseInCubic,
    /// Cubic ease-out
    EaseOutCubic,
    /// Cubic ease-in-out
    EaseInOutCubic,
}

impl EaseCurve {
    /// Apply the curve to a linear progress value (0.0-1.0)
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EaseCurve::Linear => t,
            EaseCurve::EaseInQuad => t * t,
            EaseCurve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EaseCurve::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EaseCurve::EaseInCubic => t * t * t,
            EaseCurve::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EaseCurve::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

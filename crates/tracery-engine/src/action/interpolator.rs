// action/interpolator.rs
//
// Time-shaping for actions: an easing curve plus ping-pong / inverse
// modifiers. Pure math, no dependencies on nodes or the scheduler.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized action time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start.
    CubicIn,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Exponential ramp-up.
    ExpoIn,
    /// Exponential tail-off.
    ExpoOut,
    ExpoInOut,
    /// Bouncy finish.
    BounceOut,
    /// Spring past the target, then settle.
    ElasticOut,
}

impl Curve {
    /// Apply the curve to `t` in [0, 1].
    ///
    /// Output is typically in [0, 1] but can overshoot for `ElasticOut`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,

            Curve::QuadIn => t * t,
            Curve::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Curve::CubicIn => t * t * t,
            Curve::CubicOut => 1.0 - (1.0 - t).powi(3),
            Curve::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Curve::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
            Curve::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Curve::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            Curve::BounceOut => bounce_out(t),

            Curve::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
        }
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// An action's complete easing hook: curve plus time/value modifiers.
///
/// `ping_pong` folds time so the action plays forward then back within one
/// duration; `inverse` mirrors the eased value. Both compose with any curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interpolator {
    #[serde(default)]
    pub curve: Curve,
    #[serde(default)]
    pub ping_pong: bool,
    #[serde(default)]
    pub inverse: bool,
}

impl Interpolator {
    pub fn new(curve: Curve) -> Self {
        Self {
            curve,
            ping_pong: false,
            inverse: false,
        }
    }

    pub fn ping_pong(mut self) -> Self {
        self.ping_pong = true;
        self
    }

    pub fn inverse(mut self) -> Self {
        self.inverse = true;
        self
    }

    /// Shape normalized time `t` in [0, 1] into an eased progress value.
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let t = if self.ping_pong {
            1.0 - (2.0 * t - 1.0).abs()
        } else {
            t
        };
        let v = self.curve.apply(t);
        if self.inverse {
            1.0 - v
        } else {
            v
        }
    }
}

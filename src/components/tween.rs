//! Easing curves for animated interpolation.
//!
//! Skill fills use [`Easing::CubicOut`]; value counters use
//! [`Easing::Linear`]. Everything is computed in `f64` so large counter
//! ranges keep integer precision.

/// Maps a linear `t` in 0.0..=1.0 onto an animation curve.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts fast, decelerates: `1 - (1 - t)^3`.
    CubicOut,
}

impl Easing {
    /// Apply the curve to a normalized time value, clamped to [0.0, 1.0].
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => {
                let p = 1.0 - t;
                1.0 - p * p * p
            }
        }
    }

    /// Interpolate from `from` to `to` along the curve.
    pub fn interpolate(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

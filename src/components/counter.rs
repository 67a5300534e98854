//! Linear value counter.
//!
//! Counts an element's text from `start` to `end` over `duration_ms`,
//! showing `floor(value)` each frame and finishing exactly on `end`. Used
//! for statistic counters next to the skill bars.

use bevy_ecs::prelude::Component;

use super::tween::Easing;

#[derive(Component, Clone, Debug)]
pub struct ValueCounter {
    pub start: i64,
    pub end: i64,
    pub duration_ms: f64,
    pub easing: Easing,
    /// Timestamp of the first frame; set by the counter system.
    pub started_at: Option<f64>,
}

impl ValueCounter {
    pub fn new(start: i64, end: i64, duration_ms: f64) -> Self {
        ValueCounter {
            start,
            end,
            duration_ms: duration_ms.max(0.0),
            easing: Easing::Linear,
            started_at: None,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        match self.started_at {
            None => 0.0,
            Some(_) if self.duration_ms <= 0.0 => 1.0,
            Some(started) => ((now - started) / self.duration_ms).clamp(0.0, 1.0),
        }
    }

    /// Displayed value for a progress in `[0, 1]`.
    pub fn value_at(&self, progress: f64) -> i64 {
        if progress >= 1.0 {
            return self.end;
        }
        self.easing
            .interpolate(self.start as f64, self.end as f64, progress)
            .floor() as i64
    }
}

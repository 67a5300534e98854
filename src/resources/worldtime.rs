//! Engine clock.
//!
//! All animation timing in the engine is expressed in milliseconds, the unit
//! the host's frame callback reports. Timestamps recorded by cascades and
//! skill fills are read from [`WorldTime::elapsed`].
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Milliseconds since the engine started ticking.
    pub elapsed: f64,
    /// Scaled duration of the last frame in milliseconds.
    pub delta: f64,
    pub time_scale: f64,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }
}

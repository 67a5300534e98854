//! Cascade components.
//!
//! A skills container carries a [`Cascade`] holding the ordered entries and
//! the single-fire guard, plus a [`CascadeWatch`] while it waits to scroll
//! into view. The watch is removed when the cascade fires; the `Cascade`
//! stays behind as a record in the `Done` state.

use bevy_ecs::prelude::*;

use super::visibilitywatch::VisibilityWatch;

/// `Idle → Armed → Running → Done`. There is no way back from `Done`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CascadeState {
    #[default]
    Idle,
    Armed,
    Running,
    Done,
}

/// Ordered fill schedule for one container.
#[derive(Component, Clone, Debug)]
pub struct Cascade {
    /// Entry elements in display order.
    pub entries: Vec<Entity>,
    pub step_delay_ms: u32,
    pub duration_ms: u32,
    pub state: CascadeState,
    /// Set once the cascade has been launched.
    pub animated: bool,
    /// Engine time at which the cascade launched.
    pub triggered_at: Option<f64>,
}

impl Cascade {
    pub fn new(entries: Vec<Entity>, step_delay_ms: u32, duration_ms: u32) -> Self {
        Cascade {
            entries,
            step_delay_ms,
            duration_ms,
            state: CascadeState::Idle,
            animated: false,
            triggered_at: None,
        }
    }

    pub fn arm(&mut self) {
        if self.state == CascadeState::Idle {
            self.state = CascadeState::Armed;
        }
    }

    /// Mark the cascade as launched at `now`. Returns false if it already ran.
    pub fn fire(&mut self, now: f64) -> bool {
        if self.animated {
            return false;
        }
        self.animated = true;
        self.triggered_at = Some(now);
        self.state = CascadeState::Running;
        true
    }

    /// Scheduled start of entry `index` relative to the trigger.
    pub fn offset_ms(&self, index: usize) -> f64 {
        index as f64 * self.step_delay_ms as f64
    }

    /// `(N - 1) * step + duration`, zero for an empty cascade.
    pub fn total_duration_ms(&self) -> f64 {
        match self.entries.len() {
            0 => 0.0,
            n => self.offset_ms(n - 1) + self.duration_ms as f64,
        }
    }
}

/// Pending visibility watch on a cascade container.
#[derive(Component, Clone, Copy, Debug)]
pub struct CascadeWatch {
    pub watch: VisibilityWatch,
}

impl CascadeWatch {
    pub fn new(threshold: f32) -> Self {
        CascadeWatch {
            watch: VisibilityWatch::new(threshold),
        }
    }
}

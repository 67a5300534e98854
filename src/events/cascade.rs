//! Cascade and skill fill events.
//!
//! - [`CascadeTriggeredEvent`] – a container's cascade launched
//! - [`SkillFillStartedEvent`] – an entry's fill began on this frame
//! - [`SkillFillFinishedEvent`] – an entry snapped to its target
//! - [`SkillSkippedEvent`] – an entry was left out of its cascade
//!
//! Start events carry the frame timestamp so hosts and tests can check the
//! staggered offsets.

use bevy_ecs::prelude::*;

use crate::components::skill::{SkillLevel, SkipReason};

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CascadeTriggeredEvent {
    pub container: Entity,
    /// Engine time of the trigger in milliseconds.
    pub at: f64,
    /// When the last entry is scheduled to settle.
    pub ends_at: f64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SkillFillStartedEvent {
    pub entity: Entity,
    pub index: usize,
    /// Frame timestamp in milliseconds.
    pub at: f64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SkillFillFinishedEvent {
    pub entity: Entity,
    pub index: usize,
    pub target: u8,
    pub level: SkillLevel,
    pub at: f64,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct SkillSkippedEvent {
    pub entity: Entity,
    pub index: usize,
    pub reason: SkipReason,
}

//! Navigation events.

use bevy_ecs::prelude::*;

/// A different section became the active one.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionActivatedEvent {
    pub section: Entity,
    pub previous: Option<Entity>,
}

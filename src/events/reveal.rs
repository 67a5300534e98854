//! Reveal state change events.
//!
//! Triggered by [`reveal_observer`](crate::systems::reveal::reveal_observer)
//! after it has updated the element's class list.

use bevy_ecs::prelude::*;

/// An element transitioned to revealed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealedEvent {
    pub entity: Entity,
}

/// A non-sticky element scrolled back out and lost its reveal class.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcealedEvent {
    pub entity: Entity,
}

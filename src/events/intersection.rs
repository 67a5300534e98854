//! Intersection change notifications.
//!
//! An [`IntersectionEvent`] is the engine's visibility-change primitive. It is
//! triggered either by the
//! [`intersection_system`](crate::systems::intersection::intersection_system)
//! when an element crosses its watch threshold, or directly by a host that
//! computes visibility itself (see
//! [`RevealAnimationEngine::notify_intersection`](crate::engine::RevealAnimationEngine::notify_intersection)).
//!
//! Hosts may deliver the same transition more than once; observers guard
//! against that themselves.
//!
//! # Related
//!
//! - [`crate::systems::reveal::reveal_observer`]
//! - [`crate::systems::cascade::cascade_observer`]

use bevy_ecs::prelude::*;

/// Which watch on the element produced the notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WatchKind {
    Reveal,
    Cascade,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    /// The watched element.
    pub entity: Entity,
    pub kind: WatchKind,
    pub is_intersecting: bool,
    /// Visible fraction of the element, 0.0..=1.0.
    pub ratio: f32,
}

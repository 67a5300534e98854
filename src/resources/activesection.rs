//! Currently active page section.

use bevy_ecs::prelude::*;

/// The section whose navigation link is highlighted. Stays on the last match
/// while the scroll position lies outside every section.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSection(pub Option<Entity>);

//! Lookup of page elements by DOM id.
//!
//! Filled when elements are spawned so that layouts and hosts can address
//! entities by the `id` attribute they use in markup.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

/// Map of element ids to entities.
#[derive(Resource, Default, Debug)]
pub struct ElementIndex {
    pub map: FxHashMap<String, Entity>,
}

impl ElementIndex {
    pub fn new() -> Self {
        ElementIndex {
            map: FxHashMap::default(),
        }
    }

    /// Register an element id. Returns the entity previously registered under
    /// the same id, if any.
    pub fn insert(&mut self, id: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.map.insert(id.into(), entity)
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<Entity> {
        self.map.get(id.as_ref()).copied()
    }
}

//! Page spawning.
//!
//! [`spawn_page`] turns a [`PageLayoutData`] into element entities, registers
//! their ids in the [`ElementIndex`], wires skill entries to their
//! sub-elements through [`SkillParts`], and resolves navigation links to
//! their sections. It does not register any watch; the
//! returned [`PageHandles`] tell the caller what to observe.
//!
//! Missing ids are not fatal. An unknown entry keeps its slot as
//! [`Entity::PLACEHOLDER`] and an unknown sub-element is left as `None`;
//! both are reported when the cascade launches, without moving the start
//! offsets of the other entries.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::element::{ClassList, ElementBundle};
use crate::components::pagelayout::{CounterData, PageLayoutData};
use crate::components::skill::{LEVEL_HIDDEN_CLASS, LEVEL_VISIBLE_CLASS, SkillParts};
use crate::resources::elementindex::ElementIndex;

/// Class marking elements that reveal on scroll.
pub const SCROLL_ELEMENT_CLASS: &str = "scroll-element";

/// Entities of interest created by [`spawn_page`].
#[derive(Debug, Default, Clone)]
pub struct PageHandles {
    /// Elements carrying [`SCROLL_ELEMENT_CLASS`], in document order.
    pub scroll_elements: Vec<Entity>,
    pub skills: Option<SkillsHandles>,
    pub counters: Vec<(Entity, CounterData)>,
    pub navigation: Option<NavigationHandles>,
}

#[derive(Debug, Clone)]
pub struct SkillsHandles {
    pub container: Entity,
    pub entries: Vec<Entity>,
    pub step_delay_ms: Option<u32>,
    pub duration_ms: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationHandles {
    pub header: Option<Entity>,
    /// `(link, section)` pairs.
    pub links: Vec<(Entity, Entity)>,
}

fn lookup(world: &World, id: &str) -> Option<Entity> {
    world.resource::<ElementIndex>().get(id)
}

/// Spawn every element of `layout` into `world`.
pub fn spawn_page(world: &mut World, layout: &PageLayoutData) -> PageHandles {
    if !world.contains_resource::<ElementIndex>() {
        world.insert_resource(ElementIndex::new());
    }
    let mut handles = PageHandles::default();

    for data in &layout.elements {
        let mut bundle = ElementBundle::new(data.id.clone(), data.top, data.height)
            .with_classes(data.classes.iter().cloned())
            .with_text(data.text.clone());
        for (key, value) in &data.data {
            bundle = bundle.with_data(key.clone(), value.clone());
        }
        let entity = world.spawn(bundle).id();
        if data.classes.iter().any(|c| c == SCROLL_ELEMENT_CLASS) {
            handles.scroll_elements.push(entity);
        }
        let mut index = world.resource_mut::<ElementIndex>();
        if index.insert(data.id.clone(), entity).is_some() {
            warn!("Duplicate element id '{}', keeping the last one", data.id);
        }
    }

    if let Some(skills) = &layout.skills {
        match lookup(&*world, &skills.container) {
            Some(container) => {
                let mut entries = Vec::with_capacity(skills.entries.len());
                for entry in &skills.entries {
                    let Some(entity) = lookup(&*world, &entry.id) else {
                        // Holds the position so later entries keep their offsets;
                        // reported as missing when the cascade launches.
                        warn!("Skill entry '{}' not found", entry.id);
                        entries.push(Entity::PLACEHOLDER);
                        continue;
                    };
                    let parts = SkillParts {
                        fill: lookup(&*world, &entry.fill),
                        percent: lookup(&*world, &entry.percent),
                        level: entry.level.as_deref().and_then(|id| lookup(world, id)),
                    };
                    if let Some(level) = parts.level {
                        if let Some(mut classes) = world.get_mut::<ClassList>(level) {
                            if !classes.contains(LEVEL_VISIBLE_CLASS) {
                                classes.add(LEVEL_HIDDEN_CLASS);
                            }
                        }
                    }
                    world.entity_mut(entity).insert(parts);
                    entries.push(entity);
                }
                handles.skills = Some(SkillsHandles {
                    container,
                    entries,
                    step_delay_ms: skills.step_delay_ms,
                    duration_ms: skills.duration_ms,
                });
            }
            None => warn!(
                "Skills container '{}' not found, no cascade will run",
                skills.container
            ),
        }
    }

    for counter in &layout.counters {
        match world.resource::<ElementIndex>().get(&counter.id) {
            Some(entity) => handles.counters.push((entity, counter.clone())),
            None => warn!("Counter element '{}' not found", counter.id),
        }
    }

    if let Some(navigation) = &layout.navigation {
        let header = navigation.header.as_deref().and_then(|id| {
            let found = lookup(&*world, id);
            if found.is_none() {
                warn!("Header '{}' not found", id);
            }
            found
        });
        let mut links = Vec::with_capacity(navigation.links.len());
        for link in &navigation.links {
            match (lookup(&*world, &link.id), lookup(&*world, &link.section)) {
                (Some(link_entity), Some(section)) => links.push((link_entity, section)),
                _ => warn!(
                    "Navigation link '{}' to '{}' not found, ignoring it",
                    link.id, link.section
                ),
            }
        }
        handles.navigation = Some(NavigationHandles { header, links });
    }

    handles
}

//! Active section and header state.
//!
//! Runs every frame against the current scroll position:
//!
//! - a [`Section`] is current while `top - section_offset < scroll_y <=
//!   top - section_offset + height`; when several match, the lowest one on
//!   the page wins
//! - the [`NavLink`] of the current section carries the active class and
//!   every other link loses it
//! - outside every section the previous one stays active
//! - the [`PageHeader`] carries the header class while `scroll_y` is past
//!   the header threshold
//!
//! Classes are only touched when they actually change.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::element::{ClassList, LayoutBox};
use crate::components::navigation::{NavLink, PageHeader, Section};
use crate::events::navigation::SectionActivatedEvent;
use crate::resources::activesection::ActiveSection;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::viewport::Viewport;

fn set_class(classes: &mut Mut<ClassList>, class: &str, on: bool) {
    if classes.contains(class) == on {
        return;
    }
    if on {
        classes.add(class);
    } else {
        classes.remove(class);
    }
}

/// Update the active navigation link and the header class.
pub fn navigation_system(
    viewport: Res<Viewport>,
    config: Res<EngineConfig>,
    mut active: ResMut<ActiveSection>,
    sections: Query<(Entity, &LayoutBox), With<Section>>,
    mut links: Query<(&NavLink, &mut ClassList), Without<PageHeader>>,
    mut headers: Query<&mut ClassList, (With<PageHeader>, Without<NavLink>)>,
    mut commands: Commands,
) {
    let scroll_y = viewport.scroll_y;

    let current = sections
        .iter()
        .filter(|(_, layout)| {
            let top = layout.top - config.section_offset;
            scroll_y > top && scroll_y <= top + layout.height
        })
        .max_by(|(_, a), (_, b)| a.top.total_cmp(&b.top))
        .map(|(entity, _)| entity);

    if let Some(section) = current {
        if active.0 != Some(section) {
            let previous = active.0.replace(section);
            debug!("Section {:?} active at scroll {}", section, scroll_y);
            commands.trigger(SectionActivatedEvent { section, previous });
        }
    }

    let active_section = active.0;
    for (link, mut classes) in links.iter_mut() {
        set_class(
            &mut classes,
            &config.active_class,
            active_section == Some(link.section),
        );
    }

    let scrolled = scroll_y > config.header_threshold;
    for mut classes in headers.iter_mut() {
        set_class(&mut classes, &config.header_class, scrolled);
    }
}

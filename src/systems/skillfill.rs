//! Skill fill animation.
//!
//! [`skill_fill_system`] advances every [`SkillFill`] once per frame:
//!
//! 1. Entries whose scheduled start lies in the future are left alone.
//! 2. On the first frame at or after the start, the frame time is recorded
//!    and a [`SkillFillStartedEvent`] is triggered.
//! 3. `t = clamp((now - started_at) / duration, 0, 1)` and the eased value
//!    is written to the fill width and the rounded percent label.
//! 4. At `t == 1` the fill component is removed and [`settle_entry`] snaps
//!    the entry to its exact target and shows the level label.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::element::{ClassList, Style, TextContent};
use crate::components::skill::{
    LEVEL_HIDDEN_CLASS, LEVEL_VISIBLE_CLASS, SkillEntry, SkillFill, SkillParts, fill_width,
};
use crate::events::cascade::{SkillFillFinishedEvent, SkillFillStartedEvent};
use crate::resources::worldtime::WorldTime;

/// Advance all running skill fills.
pub fn skill_fill_system(
    world_time: Res<WorldTime>,
    mut fills: Query<(Entity, &mut SkillFill, &SkillParts)>,
    mut styles: Query<&mut Style>,
    mut texts: Query<&mut TextContent>,
    mut commands: Commands,
) {
    let now = world_time.elapsed;
    for (entity, mut fill, parts) in fills.iter_mut() {
        if now < fill.start_at {
            continue;
        }
        if fill.started_at.is_none() {
            fill.started_at = Some(now);
            commands.trigger(SkillFillStartedEvent {
                entity,
                index: fill.index,
                at: now,
            });
        }

        let t = fill.progress(now);
        if t >= 1.0 {
            let (index, entry, parts) = (fill.index, fill.entry, *parts);
            commands.entity(entity).remove::<SkillFill>();
            commands.queue(move |world: &mut World| {
                settle_entry(world, entity, index, entry, parts);
            });
            continue;
        }

        let value = fill.entry.value_at(fill.easing, t);
        if let Some(fill_el) = parts.fill {
            if let Ok(mut style) = styles.get_mut(fill_el) {
                style.width = Some(fill_width(value));
            }
        }
        if let Some(percent_el) = parts.percent {
            if let Ok(mut text) = texts.get_mut(percent_el) {
                text.0 = format!("{}", value.round() as u8);
            }
        }
    }
}

/// Write an entry's final state: exact target width and label, and the level
/// label swapped to its visible class.
pub fn settle_entry(world: &mut World, entity: Entity, index: usize, entry: SkillEntry, parts: SkillParts) {
    let target = entry.target;
    let level = entry.level();

    if let Some(fill_el) = parts.fill {
        if let Some(mut style) = world.get_mut::<Style>(fill_el) {
            style.width = Some(format!("{}%", target));
        }
    }
    if let Some(percent_el) = parts.percent {
        if let Some(mut text) = world.get_mut::<TextContent>(percent_el) {
            text.0 = target.to_string();
        }
    }
    if let Some(level_el) = parts.level {
        if let Some(mut classes) = world.get_mut::<ClassList>(level_el) {
            classes.swap(LEVEL_HIDDEN_CLASS, LEVEL_VISIBLE_CLASS);
        }
        if let Some(mut text) = world.get_mut::<TextContent>(level_el) {
            text.0 = level.label().to_string();
        }
    }

    let at = world.resource::<WorldTime>().elapsed;
    debug!(
        "Skill entry {} ({:?}) settled at {}% ({:?})",
        index, entity, target, level
    );
    world.trigger(SkillFillFinishedEvent {
        entity,
        index,
        target,
        level,
        at,
    });
}

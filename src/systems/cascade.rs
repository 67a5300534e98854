//! Cascade launch and lifecycle.
//!
//! - [`cascade_observer`] – launches a container's cascade on its first
//!   intersection
//! - [`trigger_cascade`] – guard, release the watch, schedule every entry
//! - [`settle_cascade`] – fill every entry to its target at once, for hosts
//!   without intersection support
//! - [`cascade_state_system`] – moves `Running` cascades to `Done` once their
//!   fills have settled
//!
//! # Entry validation
//!
//! Each entry is resolved independently. A missing target, a non-integer or
//! out-of-range target, or a missing fill/percent element skips that entry
//! only; the level label is optional. Skipped entries keep their position so
//! the offsets of their siblings do not move.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::cascade::{Cascade, CascadeState, CascadeWatch};
use crate::components::element::{ClassList, DataAttributes, Style, TextContent};
use crate::components::skill::{SkillEntry, SkillFill, SkillParts, SkipReason, TARGET_ATTRIBUTE};
use crate::events::cascade::{CascadeTriggeredEvent, SkillSkippedEvent};
use crate::events::intersection::{IntersectionEvent, WatchKind};
use crate::resources::worldtime::WorldTime;
use crate::systems::skillfill::settle_entry;

/// Observer launching cascades when their container becomes visible.
///
/// The guard lives in [`trigger_cascade`], so repeated signals for the same
/// transition are harmless.
pub fn cascade_observer(trigger: On<IntersectionEvent>, mut commands: Commands) {
    let event = trigger.event();
    if event.kind != WatchKind::Cascade || !event.is_intersecting {
        return;
    }
    let container = event.entity;
    commands.queue(move |world: &mut World| {
        trigger_cascade(world, container);
    });
}

fn part(world: &World, entity: Option<Entity>) -> Option<EntityRef<'_>> {
    entity.and_then(|e| world.get_entity(e).ok())
}

/// Read and validate one entry.
pub fn resolve_entry(world: &World, entry: Entity) -> Result<(SkillEntry, SkillParts), SkipReason> {
    let Ok(entry_ref) = world.get_entity(entry) else {
        return Err(SkipReason::MissingElement(format!("entry {:?}", entry)));
    };
    let skill = SkillEntry::parse(
        entry_ref
            .get::<DataAttributes>()
            .and_then(|data| data.get(TARGET_ATTRIBUTE)),
    )?;
    let parts = entry_ref.get::<SkillParts>().copied().unwrap_or_default();

    if !part(world, parts.fill).is_some_and(|e| e.contains::<Style>()) {
        return Err(SkipReason::MissingElement("fill indicator".to_string()));
    }
    if !part(world, parts.percent).is_some_and(|e| e.contains::<TextContent>()) {
        return Err(SkipReason::MissingElement("percent label".to_string()));
    }
    if parts.level.is_some()
        && !part(world, parts.level)
            .is_some_and(|e| e.contains::<TextContent>() && e.contains::<ClassList>())
    {
        return Err(SkipReason::MissingElement("level label".to_string()));
    }
    Ok((skill, parts))
}

fn report_skip(world: &mut World, entity: Entity, index: usize, reason: SkipReason) {
    warn!("Skipping skill entry {} ({:?}): {}", index, entity, reason);
    world.trigger(SkillSkippedEvent {
        entity,
        index,
        reason,
    });
}

/// Mark the cascade as fired and release its watch. Returns a copy of the
/// schedule, or `None` if it does not exist or already ran.
fn fire(world: &mut World, container: Entity, now: f64) -> Option<Cascade> {
    let schedule = {
        let mut cascade = world.get_mut::<Cascade>(container)?;
        if !cascade.fire(now) {
            return None;
        }
        Cascade::clone(&cascade)
    };
    world.entity_mut(container).remove::<CascadeWatch>();
    world.trigger(CascadeTriggeredEvent {
        container,
        at: now,
        ends_at: now + schedule.total_duration_ms(),
    });
    Some(schedule)
}

/// Launch a container's cascade at the current engine time.
///
/// Entry `i` is scheduled to start `i * step_delay_ms` after the trigger.
/// Returns false if the container has no cascade or it already ran.
pub fn trigger_cascade(world: &mut World, container: Entity) -> bool {
    let now = world.resource::<WorldTime>().elapsed;
    let Some(schedule) = fire(world, container, now) else {
        return false;
    };
    info!(
        "Cascade on {:?} triggered at {:.0}ms with {} entries, settling by {:.0}ms",
        container,
        now,
        schedule.entries.len(),
        now + schedule.total_duration_ms()
    );

    for (index, &entry) in schedule.entries.iter().enumerate() {
        match resolve_entry(world, entry) {
            Ok((skill, _)) => {
                let fill = SkillFill::new(
                    skill,
                    index,
                    container,
                    now + schedule.offset_ms(index),
                    schedule.duration_ms as f64,
                );
                world.entity_mut(entry).insert(fill);
            }
            Err(reason) => report_skip(world, entry, index, reason),
        }
    }
    true
}

/// Fill every entry of a cascade to its final state immediately.
pub fn settle_cascade(world: &mut World, container: Entity) -> bool {
    let now = world.resource::<WorldTime>().elapsed;
    let Some(schedule) = fire(world, container, now) else {
        return false;
    };
    info!(
        "Cascade on {:?} settled immediately without intersection support",
        container
    );

    for (index, &entry) in schedule.entries.iter().enumerate() {
        match resolve_entry(world, entry) {
            Ok((skill, parts)) => settle_entry(world, entry, index, skill, parts),
            Err(reason) => report_skip(world, entry, index, reason),
        }
    }
    if let Some(mut cascade) = world.get_mut::<Cascade>(container) {
        cascade.state = CascadeState::Done;
    }
    true
}

/// Move running cascades whose entries have all settled to `Done`.
pub fn cascade_state_system(mut cascades: Query<(Entity, &mut Cascade)>, fills: Query<&SkillFill>) {
    for (entity, mut cascade) in cascades.iter_mut() {
        if cascade.state != CascadeState::Running {
            continue;
        }
        if fills.iter().any(|fill| fill.container == entity) {
            continue;
        }
        cascade.state = CascadeState::Done;
        info!("Cascade on {:?} done", entity);
    }
}

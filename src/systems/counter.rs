//! Value counter system.
//!
//! Advances [`ValueCounter`] components: the first frame records the start
//! time, every frame writes the floored value, and the component is removed
//! once the counter lands on its end value.

use bevy_ecs::prelude::*;

use crate::components::counter::ValueCounter;
use crate::components::element::TextContent;
use crate::resources::worldtime::WorldTime;

pub fn counter_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut ValueCounter, &mut TextContent)>,
    mut commands: Commands,
) {
    let now = world_time.elapsed;
    for (entity, mut counter, mut text) in query.iter_mut() {
        if counter.started_at.is_none() {
            counter.started_at = Some(now);
        }
        let progress = counter.progress(now);
        text.0 = counter.value_at(progress).to_string();
        if progress >= 1.0 {
            commands.entity(entity).remove::<ValueCounter>();
        }
    }
}

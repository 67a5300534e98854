//! Viewport intersection system.
//!
//! Tests every registered [`RevealWatch`] and [`CascadeWatch`] against the
//! current [`Viewport`] and triggers an [`IntersectionEvent`] whenever a
//! watch crosses its threshold in either direction. Steady states produce no
//! events, so observers only see transitions from this source.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::cascade::CascadeWatch;
use crate::components::element::LayoutBox;
use crate::components::reveal::RevealWatch;
use crate::components::visibilitywatch::{VisibilityWatch, intersection_ratio};
use crate::events::intersection::{IntersectionEvent, WatchKind};
use crate::resources::viewport::Viewport;

fn check(
    entity: Entity,
    kind: WatchKind,
    layout: &LayoutBox,
    viewport: &Viewport,
    watch: &mut VisibilityWatch,
    commands: &mut Commands,
) {
    let ratio = intersection_ratio(layout, viewport, watch);
    if let Some(is_intersecting) = watch.update(ratio) {
        debug!(
            "{:?} watch on {:?}: intersecting={} ratio={:.2}",
            kind, entity, is_intersecting, ratio
        );
        commands.trigger(IntersectionEvent {
            entity,
            kind,
            is_intersecting,
            ratio,
        });
    }
}

/// Emit intersection transitions for all active watches.
pub fn intersection_system(
    viewport: Res<Viewport>,
    mut reveals: Query<(Entity, &LayoutBox, &mut RevealWatch)>,
    mut cascades: Query<(Entity, &LayoutBox, &mut CascadeWatch)>,
    mut commands: Commands,
) {
    for (entity, layout, mut reveal) in reveals.iter_mut() {
        check(
            entity,
            WatchKind::Reveal,
            layout,
            &viewport,
            &mut reveal.watch,
            &mut commands,
        );
    }
    for (entity, layout, mut cascade) in cascades.iter_mut() {
        check(
            entity,
            WatchKind::Cascade,
            layout,
            &viewport,
            &mut cascade.watch,
            &mut commands,
        );
    }
}

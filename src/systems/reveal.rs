//! Reveal-on-scroll observer.
//!
//! [`reveal_observer`] reacts to [`IntersectionEvent`]s of kind
//! [`WatchKind::Reveal`]:
//!
//! - entering: add the watch's class, mark the element revealed and, for
//!   sticky watches, release the watch so later signals are ignored
//! - leaving: only non-sticky watches remove the class again
//!
//! [`reveal_now`] applies the same reveal without a watch; it is used when the
//! host cannot deliver intersection notifications.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::element::ClassList;
use crate::components::reveal::{RevealState, RevealWatch};
use crate::events::intersection::{IntersectionEvent, WatchKind};
use crate::events::reveal::{ConcealedEvent, RevealedEvent};

/// Observer applying reveal transitions.
pub fn reveal_observer(
    trigger: On<IntersectionEvent>,
    mut query: Query<(&RevealWatch, &mut RevealState, &mut ClassList)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.kind != WatchKind::Reveal {
        return;
    }
    let entity = event.entity;
    // No watch means it was never observed or already released.
    let Ok((watch, mut state, mut classes)) = query.get_mut(entity) else {
        return;
    };

    if event.is_intersecting {
        if state.is_revealed() {
            return;
        }
        classes.add(watch.class.clone());
        *state = RevealState::Revealed;
        if watch.sticky {
            commands.entity(entity).remove::<RevealWatch>();
        }
        debug!("Revealed {:?}", entity);
        commands.trigger(RevealedEvent { entity });
    } else if !watch.sticky && state.is_revealed() {
        classes.remove(&watch.class);
        *state = RevealState::Unrevealed;
        debug!("Concealed {:?}", entity);
        commands.trigger(ConcealedEvent { entity });
    }
}

/// Reveal an element immediately, without a watch.
///
/// Returns false if the element does not exist or was already revealed.
pub fn reveal_now(world: &mut World, entity: Entity, class: &str) -> bool {
    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        return false;
    };
    if entity_mut
        .get::<RevealState>()
        .is_some_and(RevealState::is_revealed)
    {
        return false;
    }
    match entity_mut.get_mut::<ClassList>() {
        Some(mut classes) => {
            classes.add(class);
        }
        None => {
            entity_mut.insert(ClassList::from_classes([class]));
        }
    }
    entity_mut.insert(RevealState::Revealed);
    info!("Revealed {:?} without intersection support", entity);
    world.trigger(RevealedEvent { entity });
    true
}

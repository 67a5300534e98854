//! The reveal and cascade animation engine.
//!
//! [`RevealAnimationEngine`] owns the ECS world that models the page, the
//! per-frame schedule, and every watch registration. Hosts interact with it
//! through a small surface:
//!
//! - build the page with [`spawn_element`](RevealAnimationEngine::spawn_element)
//!   or [`load_page`](RevealAnimationEngine::load_page)
//! - register watches with [`observe_reveal`](RevealAnimationEngine::observe_reveal)
//!   and [`observe_cascade`](RevealAnimationEngine::observe_cascade)
//! - drive it with [`tick`](RevealAnimationEngine::tick) once per animation
//!   frame, plus [`set_scroll`](RevealAnimationEngine::set_scroll) or
//!   [`notify_intersection`](RevealAnimationEngine::notify_intersection)
//!
//! # Frame order
//!
//! 1. advance [`WorldTime`]
//! 2. intersection transitions (reveal and cascade observers run here)
//! 3. active section and header
//! 4. skill fills
//! 5. cascade state bookkeeping
//! 6. value counters
//!
//! Nothing in a frame can fail: skipped entries and missing elements are
//! logged and reported through events.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::cascade::{Cascade, CascadeState, CascadeWatch};
use crate::components::counter::ValueCounter;
use crate::components::element::{ClassList, ElementBundle, LayoutBox, Style, TextContent};
use crate::components::navigation::{NavLink, PageHeader, Section};
use crate::components::pagelayout::PageLayoutData;
use crate::components::reveal::{RevealState, RevealWatch};
use crate::components::skill::{SkillFill, SkipReason};
use crate::events::intersection::{IntersectionEvent, WatchKind};
use crate::resources::activesection::ActiveSection;
use crate::resources::elementindex::ElementIndex;
use crate::resources::engineconfig::{EngineConfig, STEP_DELAY_RANGE_MS};
use crate::resources::hostcapabilities::HostCapabilities;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::cascade::{cascade_observer, cascade_state_system, settle_cascade, trigger_cascade};
use crate::systems::counter::counter_system;
use crate::systems::intersection::intersection_system;
use crate::systems::navigation::navigation_system;
use crate::systems::pagelayout::{PageHandles, spawn_page};
use crate::systems::reveal::{reveal_now, reveal_observer};
use crate::systems::skillfill::skill_fill_system;
use crate::systems::time::update_world_time;

pub struct RevealAnimationEngine {
    world: World,
    schedule: Schedule,
}

impl Default for RevealAnimationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::new())
    }
}

impl RevealAnimationEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(Viewport::new(
            config.viewport_width as f32,
            config.viewport_height as f32,
        ));
        world.insert_resource(HostCapabilities::default());
        world.insert_resource(ElementIndex::new());
        world.insert_resource(ActiveSection::default());
        world.insert_resource(config);

        world.spawn(Observer::new(reveal_observer));
        world.spawn(Observer::new(cascade_observer));
        // Observers must be registered before anything triggers.
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                intersection_system,
                navigation_system,
                skill_fill_system,
                cascade_state_system,
                counter_system,
            )
                .chain(),
        );

        RevealAnimationEngine { world, schedule }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &EngineConfig {
        self.world.resource::<EngineConfig>()
    }

    // --------------- Page ---------------

    /// Spawn an element and register its id.
    pub fn spawn_element(&mut self, bundle: ElementBundle) -> Entity {
        let id = bundle.element.id.clone();
        let entity = self.world.spawn(bundle).id();
        if self
            .world
            .resource_mut::<ElementIndex>()
            .insert(id.clone(), entity)
            .is_some()
        {
            warn!("Duplicate element id '{}', keeping the last one", id);
        }
        entity
    }

    /// Spawn a whole page. Watches are not registered; see [`Self::observe_page`].
    pub fn load_page(&mut self, layout: &PageLayoutData) -> PageHandles {
        let handles = spawn_page(&mut self.world, layout);
        info!(
            "Loaded page: {} elements, {} scroll elements, skills={}",
            layout.elements.len(),
            handles.scroll_elements.len(),
            handles.skills.is_some()
        );
        handles
    }

    /// Register the watches a loaded page asks for: reveal on every scroll
    /// element, the skills cascade, counters, and navigation.
    pub fn observe_page(&mut self, handles: &PageHandles) {
        self.observe_reveal(&handles.scroll_elements);
        if let Some(skills) = &handles.skills {
            let (step, duration) = {
                let config = self.config();
                (
                    skills.step_delay_ms.unwrap_or(config.step_delay_ms),
                    skills.duration_ms.unwrap_or(config.duration_ms),
                )
            };
            if let Err(reason) =
                self.observe_cascade(skills.container, &skills.entries, step, duration)
            {
                warn!("Skills cascade not registered: {}", reason);
            }
        }
        for (entity, counter) in &handles.counters {
            self.animate_value(*entity, counter.start, counter.end, counter.duration_ms);
        }
        if let Some(navigation) = &handles.navigation {
            self.observe_navigation(navigation.header, &navigation.links);
        }
    }

    pub fn find(&self, id: &str) -> Option<Entity> {
        self.world.resource::<ElementIndex>().get(id)
    }

    // --------------- Watches ---------------

    /// Register one-shot reveal watches. Returns how many elements were
    /// registered or, without intersection support, revealed on the spot.
    pub fn observe_reveal(&mut self, elements: &[Entity]) -> usize {
        let (threshold, margin_bottom, sticky, class) = {
            let config = self.config();
            (
                config.reveal_threshold,
                config.reveal_margin_bottom,
                config.sticky_reveal,
                config.reveal_class.clone(),
            )
        };
        let supported = self.intersection_supported();
        let mut registered = 0;

        for &entity in elements {
            if !supported {
                if reveal_now(&mut self.world, entity, &class) {
                    registered += 1;
                }
                continue;
            }
            let Ok(mut entity_mut) = self.world.get_entity_mut(entity) else {
                warn!("Cannot observe {:?}: no such element", entity);
                continue;
            };
            let revealed = entity_mut
                .get::<RevealState>()
                .is_some_and(RevealState::is_revealed);
            if revealed && sticky {
                continue;
            }
            if !revealed {
                entity_mut.insert(RevealState::Unrevealed);
            }
            if !entity_mut.contains::<ClassList>() {
                entity_mut.insert(ClassList::default());
            }
            let mut watch = RevealWatch::new(threshold, margin_bottom, class.clone())
                .with_sticky(sticky);
            watch.watch.intersecting = revealed;
            entity_mut.insert(watch);
            registered += 1;
        }
        self.world.flush();
        registered
    }

    /// Register a cascade on `container` over `entries`.
    ///
    /// A container whose cascade already ran is left untouched.
    pub fn observe_cascade(
        &mut self,
        container: Entity,
        entries: &[Entity],
        step_delay_ms: u32,
        duration_ms: u32,
    ) -> Result<(), SkipReason> {
        if self.world.get_entity(container).is_err() {
            return Err(SkipReason::MissingElement(format!(
                "cascade container {:?}",
                container
            )));
        }
        if self
            .world
            .get::<Cascade>(container)
            .is_some_and(|cascade| cascade.animated)
        {
            warn!("Cascade on {:?} already ran, not re-arming", container);
            return Ok(());
        }
        if !STEP_DELAY_RANGE_MS.contains(&step_delay_ms) {
            warn!(
                "step_delay_ms={} is outside the usual {:?} range",
                step_delay_ms, STEP_DELAY_RANGE_MS
            );
        }

        let mut cascade = Cascade::new(entries.to_vec(), step_delay_ms, duration_ms);
        cascade.arm();
        let threshold = self.config().cascade_threshold;
        self.world
            .entity_mut(container)
            .insert((cascade, CascadeWatch::new(threshold)));

        if !self.intersection_supported() {
            settle_cascade(&mut self.world, container);
        }
        self.world.flush();
        Ok(())
    }

    /// Track the scroll position for navigation: each `(link, section)` pair
    /// highlights `link` while `section` is current, and `header` gets its
    /// class once the page has scrolled. Returns how many links were
    /// registered.
    pub fn observe_navigation(&mut self, header: Option<Entity>, links: &[(Entity, Entity)]) -> usize {
        if let Some(header) = header {
            match self.world.get_entity_mut(header) {
                Ok(mut entity_mut) => {
                    if !entity_mut.contains::<ClassList>() {
                        entity_mut.insert(ClassList::default());
                    }
                    entity_mut.insert(PageHeader);
                }
                Err(_) => warn!("Cannot track header {:?}: no such element", header),
            }
        }

        let mut registered = 0;
        for &(link, section) in links {
            if self.world.get::<LayoutBox>(section).is_none() {
                warn!("Cannot link {:?} to {:?}: section has no layout box", link, section);
                continue;
            }
            let Ok(mut link_mut) = self.world.get_entity_mut(link) else {
                warn!("Cannot track link {:?}: no such element", link);
                continue;
            };
            if !link_mut.contains::<ClassList>() {
                link_mut.insert(ClassList::default());
            }
            link_mut.insert(NavLink { section });
            self.world.entity_mut(section).insert(Section);
            registered += 1;
        }
        registered
    }

    /// Launch a cascade now, regardless of visibility. Returns false if the
    /// container has no cascade or it already ran.
    pub fn run_cascade(&mut self, container: Entity) -> bool {
        let fired = trigger_cascade(&mut self.world, container);
        self.world.flush();
        fired
    }

    /// Count an element's text from `start` to `end`.
    pub fn animate_value(&mut self, entity: Entity, start: i64, end: i64, duration_ms: f64) -> bool {
        let Ok(mut entity_mut) = self.world.get_entity_mut(entity) else {
            warn!("Cannot animate value on {:?}: no such element", entity);
            return false;
        };
        if !entity_mut.contains::<TextContent>() {
            entity_mut.insert(TextContent::default());
        }
        entity_mut.insert(ValueCounter::new(start, end, duration_ms));
        true
    }

    // --------------- Host input ---------------

    /// Deliver a visibility notification computed by the host.
    ///
    /// Every watch on the element records the ratio and receives the signal,
    /// even if its state did not change; observers discard repeats.
    pub fn notify_intersection(&mut self, entity: Entity, ratio: f32) {
        let ratio = ratio.clamp(0.0, 1.0);
        let mut events = Vec::with_capacity(2);
        if let Some(mut reveal) = self.world.get_mut::<RevealWatch>(entity) {
            let is_intersecting = reveal.watch.accepts(ratio);
            reveal.watch.intersecting = is_intersecting;
            events.push((WatchKind::Reveal, is_intersecting));
        }
        if let Some(mut cascade) = self.world.get_mut::<CascadeWatch>(entity) {
            let is_intersecting = cascade.watch.accepts(ratio);
            cascade.watch.intersecting = is_intersecting;
            events.push((WatchKind::Cascade, is_intersecting));
        }
        for (kind, is_intersecting) in events {
            self.world.trigger(IntersectionEvent {
                entity,
                kind,
                is_intersecting,
                ratio,
            });
        }
        self.world.flush();
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.world.resource_mut::<Viewport>().scroll_y = scroll_y.max(0.0);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let mut viewport = self.world.resource_mut::<Viewport>();
        viewport.width = width.max(0.0);
        viewport.height = height.max(0.0);
    }

    pub fn set_intersection_supported(&mut self, supported: bool) {
        self.world
            .resource_mut::<HostCapabilities>()
            .intersection_supported = supported;
    }

    pub fn intersection_supported(&self) -> bool {
        self.world
            .resource::<HostCapabilities>()
            .intersection_supported
    }

    /// Advance one animation frame of `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        update_world_time(&mut self.world, dt_ms);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    // --------------- Queries ---------------

    /// Engine time in milliseconds.
    pub fn elapsed(&self) -> f64 {
        self.world.resource::<WorldTime>().elapsed
    }

    /// True when no fill or counter is still animating.
    pub fn is_settled(&mut self) -> bool {
        let mut fills = self.world.query_filtered::<Entity, With<SkillFill>>();
        if fills.iter(&self.world).next().is_some() {
            return false;
        }
        let mut counters = self.world.query_filtered::<Entity, With<ValueCounter>>();
        counters.iter(&self.world).next().is_none()
    }

    pub fn is_revealed(&self, entity: Entity) -> bool {
        self.world
            .get::<RevealState>(entity)
            .is_some_and(RevealState::is_revealed)
    }

    /// Section whose navigation link is currently highlighted.
    pub fn active_section(&self) -> Option<Entity> {
        self.world.resource::<ActiveSection>().0
    }

    pub fn cascade_state(&self, container: Entity) -> Option<CascadeState> {
        self.world.get::<Cascade>(container).map(|c| c.state)
    }

    pub fn has_class(&self, entity: Entity, class: &str) -> bool {
        self.world
            .get::<ClassList>(entity)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn text(&self, entity: Entity) -> Option<&str> {
        self.world.get::<TextContent>(entity).map(|t| t.0.as_str())
    }

    pub fn width(&self, entity: Entity) -> Option<&str> {
        self.world
            .get::<Style>(entity)
            .and_then(|s| s.width.as_deref())
    }
}

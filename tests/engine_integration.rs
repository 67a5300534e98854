//! Engine integration tests for reveals, cascades and skill fills.
//!
//! Each test builds a small page through [`RevealAnimationEngine`], drives it
//! with scroll positions or host intersection signals, and inspects the
//! resulting classes, widths and labels. Observers record events into
//! `Arc<Mutex<_>>` so start offsets and counts can be checked.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;

use revealengine::components::cascade::{CascadeState, CascadeWatch};
use revealengine::components::element::{ClassList, ElementBundle, LayoutBox};
use revealengine::components::reveal::RevealWatch;
use revealengine::components::skill::{
    LEVEL_HIDDEN_CLASS, LEVEL_VISIBLE_CLASS, SkillFill, SkillLevel, SkillParts, SkipReason,
};
use revealengine::engine::RevealAnimationEngine;
use revealengine::events::cascade::{
    CascadeTriggeredEvent, SkillFillFinishedEvent, SkillFillStartedEvent, SkillSkippedEvent,
};
use revealengine::events::intersection::{IntersectionEvent, WatchKind};
use revealengine::events::reveal::{ConcealedEvent, RevealedEvent};
use revealengine::resources::engineconfig::EngineConfig;

const FRAME_MS: f64 = 16.0;

struct Entry {
    entity: Entity,
    fill: Entity,
    percent: Entity,
    level: Entity,
}

fn make_engine() -> RevealAnimationEngine {
    let mut config = EngineConfig::new();
    config.viewport_width = 800;
    config.viewport_height = 600;
    RevealAnimationEngine::new(config)
}

fn spawn_entry(engine: &mut RevealAnimationEngine, name: &str, raw: Option<&str>, top: f32) -> Entry {
    let fill = engine.spawn_element(ElementBundle::new(format!("{name}-fill"), top + 20.0, 8.0));
    let percent = engine
        .spawn_element(ElementBundle::new(format!("{name}-pct"), top, 16.0).with_text("0"));
    let level = engine.spawn_element(
        ElementBundle::new(format!("{name}-level"), top, 16.0)
            .with_classes(["level", LEVEL_HIDDEN_CLASS]),
    );
    let mut bundle = ElementBundle::new(name, top, 40.0);
    if let Some(raw) = raw {
        bundle = bundle.with_data("percent", raw);
    }
    let entity = engine.spawn_element(bundle);
    engine.world_mut().entity_mut(entity).insert(SkillParts {
        fill: Some(fill),
        percent: Some(percent),
        level: Some(level),
    });
    Entry {
        entity,
        fill,
        percent,
        level,
    }
}

fn spawn_skills(
    engine: &mut RevealAnimationEngine,
    top: f32,
    targets: &[Option<&str>],
) -> (Entity, Vec<Entry>) {
    let container = engine.spawn_element(
        ElementBundle::new("skills", top, 400.0).with_classes(["scroll-element"]),
    );
    let entries = targets
        .iter()
        .enumerate()
        .map(|(i, raw)| spawn_entry(engine, &format!("skill-{i}"), *raw, top + 40.0 * i as f32))
        .collect();
    (container, entries)
}

fn entities(entries: &[Entry]) -> Vec<Entity> {
    entries.iter().map(|e| e.entity).collect()
}

fn run_until_settled(engine: &mut RevealAnimationEngine, dt: f64) {
    for _ in 0..10_000 {
        engine.tick(dt);
        if engine.is_settled() {
            return;
        }
    }
    panic!("animations did not settle");
}

fn record<E: Event + Clone>(engine: &mut RevealAnimationEngine) -> Arc<Mutex<Vec<E>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    engine
        .world_mut()
        .add_observer(move |trigger: On<E>| {
            log_clone.lock().unwrap().push(trigger.event().clone());
        });
    engine.world_mut().flush();
    log
}

// ==================== REVEAL ====================

#[test]
fn reveal_happens_once_on_scroll_in() {
    let mut engine = make_engine();
    let revealed = record::<RevealedEvent>(&mut engine);
    let about = engine.spawn_element(ElementBundle::new("about", 900.0, 200.0));
    assert_eq!(engine.observe_reveal(&[about]), 1);

    engine.tick(FRAME_MS);
    assert!(!engine.is_revealed(about));
    assert!(!engine.has_class(about, "scrolled"));

    engine.set_scroll(500.0);
    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(about));
    assert!(engine.has_class(about, "scrolled"));
    assert!(engine.world().get::<RevealWatch>(about).is_none());

    // A repeated host signal and scrolling away change nothing.
    engine.notify_intersection(about, 1.0);
    engine.set_scroll(0.0);
    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(about));
    assert!(engine.has_class(about, "scrolled"));
    assert_eq!(revealed.lock().unwrap().len(), 1);
}

#[test]
fn negative_bottom_margin_delays_reveal() {
    let mut engine = make_engine();
    // Top edge 30px above the viewport bottom, inside the 50px margin.
    let el = engine.spawn_element(ElementBundle::new("late", 570.0, 100.0));
    engine.observe_reveal(&[el]);
    engine.tick(FRAME_MS);
    assert!(!engine.is_revealed(el));

    engine.set_scroll(40.0);
    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(el));
}

#[test]
fn unobserved_element_stays_unrevealed() {
    let mut engine = make_engine();
    let watched = engine.spawn_element(ElementBundle::new("watched", 10.0, 100.0));
    let plain = engine.spawn_element(ElementBundle::new("plain", 10.0, 100.0));
    engine.observe_reveal(&[watched]);
    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(watched));
    assert!(!engine.is_revealed(plain));
    assert!(!engine.has_class(plain, "scrolled"));

    // Host signals for unwatched elements are ignored.
    engine.notify_intersection(plain, 1.0);
    assert!(!engine.is_revealed(plain));
}

#[test]
fn observe_reveal_skips_despawned_elements() {
    let mut engine = make_engine();
    let gone = engine.spawn_element(ElementBundle::new("gone", 0.0, 10.0));
    engine.world_mut().despawn(gone);
    assert_eq!(engine.observe_reveal(&[gone]), 0);
    engine.tick(FRAME_MS);
}

#[test]
fn non_sticky_reveal_reverts_on_scroll_out() {
    let mut config = EngineConfig::new();
    config.viewport_height = 600;
    config.sticky_reveal = false;
    let mut engine = RevealAnimationEngine::new(config);
    let concealed = record::<ConcealedEvent>(&mut engine);
    let el = engine.spawn_element(ElementBundle::new("card", 100.0, 200.0));
    engine.observe_reveal(&[el]);

    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(el));
    assert!(engine.world().get::<RevealWatch>(el).is_some());

    engine.set_scroll(1000.0);
    engine.tick(FRAME_MS);
    assert!(!engine.is_revealed(el));
    assert!(!engine.has_class(el, "scrolled"));
    assert_eq!(concealed.lock().unwrap().len(), 1);

    engine.set_scroll(0.0);
    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(el));
}

// ==================== CASCADE ====================

#[test]
fn end_to_end_three_entry_cascade() {
    let mut engine = make_engine();
    let triggered = record::<CascadeTriggeredEvent>(&mut engine);
    let started = record::<SkillFillStartedEvent>(&mut engine);
    let finished = record::<SkillFillFinishedEvent>(&mut engine);

    let (container, entries) =
        spawn_skills(&mut engine, 0.0, &[Some("40"), Some("70"), Some("95")]);
    engine
        .observe_cascade(container, &entities(&entries), 200, 2500)
        .unwrap();
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Armed));

    engine.tick(FRAME_MS);
    engine.tick(FRAME_MS);
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Running));
    assert!(engine.world().get::<CascadeWatch>(container).is_none());

    run_until_settled(&mut engine, FRAME_MS);
    engine.tick(FRAME_MS);
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Done));

    let expected = [
        ("40", "40%", "Débutant"),
        ("70", "70%", "Intermédiaire"),
        ("95", "95%", "Avancé"),
    ];
    for (entry, (text, width, label)) in entries.iter().zip(expected) {
        assert_eq!(engine.text(entry.percent), Some(text));
        assert_eq!(engine.width(entry.fill), Some(width));
        assert_eq!(engine.text(entry.level), Some(label));
        assert!(engine.has_class(entry.level, LEVEL_VISIBLE_CLASS));
        assert!(!engine.has_class(entry.level, LEVEL_HIDDEN_CLASS));
    }

    let (trigger_at, ends_at) = {
        let triggered = triggered.lock().unwrap();
        (triggered[0].at, triggered[0].ends_at)
    };
    assert_eq!(ends_at - trigger_at, 400.0 + 2500.0);
    let started = started.lock().unwrap();
    assert_eq!(started.len(), 3);
    for ev in started.iter() {
        let offset = ev.at - trigger_at;
        let scheduled = ev.index as f64 * 200.0;
        assert!(
            offset >= scheduled && offset <= scheduled + FRAME_MS,
            "entry {} started at +{}ms",
            ev.index,
            offset
        );
    }

    let finished = finished.lock().unwrap();
    let levels: Vec<SkillLevel> = {
        let mut f: Vec<_> = finished.iter().collect();
        f.sort_by_key(|ev| ev.index);
        f.iter().map(|ev| ev.level).collect()
    };
    assert_eq!(
        levels,
        vec![
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced
        ]
    );
    let last = finished.iter().map(|ev| ev.at).fold(0.0, f64::max);
    assert!(last - trigger_at >= 400.0 + 2500.0);
    assert!(last - trigger_at <= 400.0 + 2500.0 + 2.0 * FRAME_MS);
}

#[test]
fn fill_is_monotonic_and_bounded_while_running() {
    let mut engine = make_engine();
    let (container, entries) = spawn_skills(&mut engine, 0.0, &[Some("83")]);
    engine
        .observe_cascade(container, &entities(&entries), 200, 1000)
        .unwrap();

    let mut previous = 0u32;
    let mut saw_partial = false;
    for _ in 0..100 {
        engine.tick(FRAME_MS);
        let shown: u32 = engine.text(entries[0].percent).unwrap().parse().unwrap();
        assert!(shown >= previous && shown <= 83);
        if shown > 0 && shown < 83 {
            saw_partial = true;
            // Level label stays hidden until the fill settles.
            assert!(engine.has_class(entries[0].level, LEVEL_HIDDEN_CLASS));
        }
        previous = shown;
    }
    assert!(saw_partial);
    assert_eq!(engine.text(entries[0].percent), Some("83"));
    assert_eq!(engine.width(entries[0].fill), Some("83%"));
}

#[test]
fn every_target_settles_exactly() {
    let mut engine = make_engine();
    let targets: Vec<String> = (0..=100).map(|t| t.to_string()).collect();
    let raws: Vec<Option<&str>> = targets.iter().map(|t| Some(t.as_str())).collect();
    let (container, entries) = spawn_skills(&mut engine, 0.0, &raws);
    engine
        .observe_cascade(container, &entities(&entries), 0, 333)
        .unwrap();
    engine.notify_intersection(container, 1.0);
    run_until_settled(&mut engine, 7.0);

    for (target, entry) in entries.iter().enumerate() {
        assert_eq!(engine.text(entry.percent), Some(target.to_string().as_str()));
        assert_eq!(
            engine.width(entry.fill),
            Some(format!("{}%", target).as_str())
        );
        let level = SkillLevel::from_target(target as u8);
        assert_eq!(engine.text(entry.level), Some(level.label()));
    }
}

#[test]
fn repeated_container_signal_runs_cascade_once() {
    let mut engine = make_engine();
    let triggered = record::<CascadeTriggeredEvent>(&mut engine);
    let started = record::<SkillFillStartedEvent>(&mut engine);
    let (container, entries) =
        spawn_skills(&mut engine, 5000.0, &[Some("10"), Some("50"), Some("90")]);
    engine
        .observe_cascade(container, &entities(&entries), 200, 500)
        .unwrap();

    // Deliver the same entering transition twice, bypassing the watch.
    for _ in 0..2 {
        engine.world_mut().trigger(IntersectionEvent {
            entity: container,
            kind: WatchKind::Cascade,
            is_intersecting: true,
            ratio: 1.0,
        });
        engine.world_mut().flush();
    }
    engine.notify_intersection(container, 1.0);
    assert!(!engine.run_cascade(container));

    run_until_settled(&mut engine, FRAME_MS);
    assert_eq!(triggered.lock().unwrap().len(), 1);
    assert_eq!(started.lock().unwrap().len(), entries.len());
}

#[test]
fn stricter_cascade_threshold_waits_for_more_of_the_section() {
    let mut engine = make_engine();
    let (container, entries) = spawn_skills(&mut engine, 400.0, &[Some("60")]);
    engine.world_mut().get_mut::<LayoutBox>(container).unwrap().height = 1000.0;
    engine.observe_reveal(&[container]);
    engine
        .observe_cascade(container, &entities(&entries), 200, 500)
        .unwrap();

    // 150px inside the reveal root, 200px inside the cascade root.
    engine.tick(FRAME_MS);
    engine.tick(FRAME_MS);
    assert!(engine.is_revealed(container));
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Armed));

    engine.set_scroll(300.0);
    engine.tick(FRAME_MS);
    engine.tick(FRAME_MS);
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Running));
}

#[test]
fn cascade_never_runs_without_intersection() {
    let mut engine = make_engine();
    let (container, entries) = spawn_skills(&mut engine, 5000.0, &[Some("60"), Some("20")]);
    engine
        .observe_cascade(container, &entities(&entries), 200, 500)
        .unwrap();
    for _ in 0..200 {
        engine.tick(FRAME_MS);
    }
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Armed));
    assert_eq!(engine.text(entries[0].percent), Some("0"));
    assert_eq!(engine.width(entries[0].fill), None);
    assert!(engine.world().get::<SkillFill>(entries[0].entity).is_none());
}

#[test]
fn cascade_keeps_running_after_scrolling_away() {
    let mut engine = make_engine();
    let (container, entries) = spawn_skills(&mut engine, 0.0, &[Some("75"), Some("30")]);
    engine
        .observe_cascade(container, &entities(&entries), 300, 800)
        .unwrap();
    engine.tick(FRAME_MS);
    engine.set_scroll(4000.0);
    run_until_settled(&mut engine, FRAME_MS);
    assert_eq!(engine.text(entries[0].percent), Some("75"));
    assert_eq!(engine.text(entries[1].percent), Some("30"));

    // Coming back does not re-arm it.
    engine.set_scroll(0.0);
    engine.tick(FRAME_MS);
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Done));
    assert!(engine.observe_cascade(container, &entities(&entries), 200, 500).is_ok());
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Done));
}

#[test]
fn malformed_and_incomplete_entries_are_skipped() {
    let mut engine = make_engine();
    let skipped = record::<SkillSkippedEvent>(&mut engine);
    let started = record::<SkillFillStartedEvent>(&mut engine);
    let (container, entries) = spawn_skills(
        &mut engine,
        0.0,
        &[Some("50"), Some("abc"), None, Some("150"), Some("30")],
    );
    // Last entry loses its fill indicator.
    let fill = entries[4].fill;
    engine.world_mut().despawn(fill);

    engine
        .observe_cascade(container, &entities(&entries), 200, 400)
        .unwrap();
    run_until_settled(&mut engine, FRAME_MS);

    assert_eq!(engine.text(entries[0].percent), Some("50"));
    assert_eq!(engine.width(entries[0].fill), Some("50%"));
    for entry in &entries[1..4] {
        assert_eq!(engine.width(entry.fill), None);
        assert_eq!(engine.text(entry.percent), Some("0"));
        assert!(engine.has_class(entry.level, LEVEL_HIDDEN_CLASS));
    }
    assert_eq!(engine.text(entries[4].percent), Some("0"));

    let skipped = skipped.lock().unwrap();
    let reasons: Vec<(usize, bool)> = skipped
        .iter()
        .map(|ev| (ev.index, matches!(ev.reason, SkipReason::MalformedData(_))))
        .collect();
    assert_eq!(reasons, vec![(1, true), (2, true), (3, true), (4, false)]);
    assert_eq!(started.lock().unwrap().len(), 1);
}

#[test]
fn missing_level_label_is_optional() {
    let mut engine = make_engine();
    let (container, entries) = spawn_skills(&mut engine, 0.0, &[Some("45")]);
    engine
        .world_mut()
        .get_mut::<SkillParts>(entries[0].entity)
        .unwrap()
        .level = None;
    engine
        .observe_cascade(container, &entities(&entries), 200, 300)
        .unwrap();
    run_until_settled(&mut engine, FRAME_MS);
    assert_eq!(engine.text(entries[0].percent), Some("45"));
    assert_eq!(engine.text(entries[0].level), Some(""));
}

#[test]
fn missing_container_is_reported() {
    let mut engine = make_engine();
    let (container, entries) = spawn_skills(&mut engine, 0.0, &[Some("45")]);
    engine.world_mut().despawn(container);
    let result = engine.observe_cascade(container, &entities(&entries), 200, 300);
    assert!(matches!(result, Err(SkipReason::MissingElement(_))));
    engine.tick(FRAME_MS);
}

// ==================== HOST WITHOUT INTERSECTION ====================

#[test]
fn without_intersection_support_everything_settles_immediately() {
    let mut engine = make_engine();
    engine.set_intersection_supported(false);
    let about = engine.spawn_element(ElementBundle::new("about", 9000.0, 200.0));
    let (container, entries) = spawn_skills(&mut engine, 9000.0, &[Some("40"), Some("x")]);

    engine.observe_reveal(&[about]);
    engine
        .observe_cascade(container, &entities(&entries), 200, 2500)
        .unwrap();

    assert!(engine.is_revealed(about));
    assert!(engine.has_class(about, "scrolled"));
    assert_eq!(engine.cascade_state(container), Some(CascadeState::Done));
    assert_eq!(engine.text(entries[0].percent), Some("40"));
    assert_eq!(engine.width(entries[0].fill), Some("40%"));
    assert_eq!(engine.text(entries[0].level), Some("Débutant"));
    assert_eq!(engine.width(entries[1].fill), None);
    assert!(engine.is_settled());
}

// ==================== COUNTERS ====================

#[test]
fn value_counter_lands_on_end() {
    let mut engine = make_engine();
    let count = engine.spawn_element(ElementBundle::new("projects", 0.0, 20.0));
    assert!(engine.animate_value(count, 0, 12, 500.0));
    engine.tick(FRAME_MS);
    assert_eq!(engine.text(count), Some("0"));
    run_until_settled(&mut engine, FRAME_MS);
    assert_eq!(engine.text(count), Some("12"));
    assert!(engine.world().get::<ClassList>(count).is_some());
}

// ==================== NAVIGATION ====================

#[test]
fn navigation_tracks_sections_and_header() {
    let mut engine = make_engine();
    let header = engine.spawn_element(ElementBundle::new("header", 0.0, 80.0));
    let home = engine.spawn_element(ElementBundle::new("home", 0.0, 600.0));
    let about = engine.spawn_element(ElementBundle::new("about", 600.0, 600.0));
    let nav_home = engine.spawn_element(ElementBundle::new("nav-home", 20.0, 20.0));
    let nav_about = engine.spawn_element(ElementBundle::new("nav-about", 20.0, 20.0));
    let gone = engine.spawn_element(ElementBundle::new("gone", 0.0, 10.0));
    engine.world_mut().despawn(gone);

    let registered = engine.observe_navigation(
        Some(header),
        &[(nav_home, home), (nav_about, about), (nav_about, gone)],
    );
    assert_eq!(registered, 2);

    engine.tick(FRAME_MS);
    assert_eq!(engine.active_section(), Some(home));
    assert!(engine.has_class(nav_home, "active"));
    assert!(!engine.has_class(header, "scrolled"));

    engine.set_scroll(501.0);
    engine.tick(FRAME_MS);
    assert_eq!(engine.active_section(), Some(about));
    assert!(!engine.has_class(nav_home, "active"));
    assert!(engine.has_class(nav_about, "active"));
    assert!(engine.has_class(header, "scrolled"));
}

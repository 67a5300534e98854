//! ECS components for page elements.
//!
//! Submodules overview:
//! - [`cascade`] – ordered skill fill schedule and its visibility watch
//! - [`counter`] – linear numeric counter for statistic elements
//! - [`element`] – DOM id, classes, style, text, data attributes, layout box
//! - [`navigation`] – sections, navigation links and the page header
//! - [`pagelayout`] – JSON description of a page
//! - [`reveal`] – reveal-on-scroll watch and state
//! - [`skill`] – skill targets, levels, sub-elements and fill animation
//! - [`tween`] – easing curves
//! - [`visibilitywatch`] – threshold/margin intersection test

pub mod cascade;
pub mod counter;
pub mod element;
pub mod navigation;
pub mod pagelayout;
pub mod reveal;
pub mod skill;
pub mod tween;
pub mod visibilitywatch;

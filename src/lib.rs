//! Reveal animation engine library.
//!
//! Drives scroll-triggered reveals and a cascaded, eased skill-bar fill over
//! a page modelled as an ECS world. The host supplies frame ticks, scroll
//! positions or intersection notifications, and mirrors the resulting class,
//! style and text changes onto the real page.
//!
//! - [`components`] – element state, watches, cascades, skill fills
//! - [`events`] – intersection, reveal and cascade notifications
//! - [`resources`] – clock, viewport, configuration, element index
//! - [`systems`] – per-frame systems and observers
//! - [`engine`] – [`engine::RevealAnimationEngine`], the entry point

pub mod components;
pub mod engine;
pub mod events;
pub mod resources;
pub mod systems;

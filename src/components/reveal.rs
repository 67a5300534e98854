//! Reveal-on-scroll components.
//!
//! - [`RevealWatch`] – registration added by `observe_reveal`
//! - [`RevealState`] – one-shot `Unrevealed → Revealed` state of an element
//!
//! See [`crate::systems::reveal`] for the observer that applies reveals.

use bevy_ecs::prelude::Component;

use super::visibilitywatch::VisibilityWatch;

/// Watches an element and reveals it when it scrolls into view.
#[derive(Component, Clone, Debug)]
pub struct RevealWatch {
    pub watch: VisibilityWatch,
    /// Class added on reveal.
    pub class: String,
    /// Sticky watches are released after the first reveal. Non-sticky
    /// watches stay registered and un-reveal on scroll-out.
    pub sticky: bool,
}

impl RevealWatch {
    pub fn new(threshold: f32, margin_bottom: f32, class: impl Into<String>) -> Self {
        RevealWatch {
            watch: VisibilityWatch::new(threshold).with_margin_bottom(margin_bottom),
            class: class.into(),
            sticky: true,
        }
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Unrevealed,
    Revealed,
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealState::Revealed)
    }
}

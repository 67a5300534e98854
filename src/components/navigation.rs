//! Scroll-driven navigation markers.
//!
//! A page section that a navigation link points at carries [`Section`]; the
//! link itself carries [`NavLink`]. The link of the section under the scroll
//! position gets the active class. The [`PageHeader`] gets its own class once
//! the page has scrolled past a small threshold.
//!
//! See [`crate::systems::navigation`] for the update rules.

use bevy_ecs::prelude::*;

/// A navigable page section. Its [`LayoutBox`](super::element::LayoutBox)
/// decides when it is the current one.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Section;

/// Navigation link pointing at a section.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub section: Entity,
}

/// The page header.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PageHeader;

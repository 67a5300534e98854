//! Viewport resource.
//!
//! Describes the visible window onto the page: its size in logical pixels and
//! the current vertical scroll offset. The intersection system tests element
//! boxes against this rectangle.

use bevy_ecs::prelude::Resource;

/// Visible area of the page in document coordinates.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
    /// Vertical scroll offset (document y of the viewport's top edge).
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Top and bottom edges of the root rectangle after applying the
    /// observer margins. A negative `margin_bottom` pulls the bottom edge up.
    pub fn root_span(&self, margin_top: f32, margin_bottom: f32) -> (f32, f32) {
        let top = self.scroll_y - margin_top;
        let bottom = self.scroll_y + self.height + margin_bottom;
        (top, bottom.max(top))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1280.0, 720.0)
    }
}

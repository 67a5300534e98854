//! Viewport intersection watch.
//!
//! A [`VisibilityWatch`] is the engine's equivalent of an intersection
//! observer registration: a threshold, root margins, and the last reported
//! intersecting state. It is embedded in [`RevealWatch`](super::reveal::RevealWatch)
//! and [`CascadeWatch`](super::cascade::CascadeWatch) so an element can carry
//! both with different thresholds.

use super::element::LayoutBox;
use crate::resources::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityWatch {
    /// Fraction of the element (0.0..=1.0) that must be inside the root.
    pub threshold: f32,
    pub margin_top: f32,
    /// Negative values shrink the root so elements trigger later.
    pub margin_bottom: f32,
    /// Last reported state; starts out not intersecting.
    pub intersecting: bool,
}

impl VisibilityWatch {
    pub fn new(threshold: f32) -> Self {
        VisibilityWatch {
            threshold: threshold.clamp(0.0, 1.0),
            margin_top: 0.0,
            margin_bottom: 0.0,
            intersecting: false,
        }
    }

    pub fn with_margin_bottom(mut self, margin_bottom: f32) -> Self {
        self.margin_bottom = margin_bottom;
        self
    }

    /// Whether a given ratio counts as intersecting for this watch.
    ///
    /// A zero threshold needs some overlap; otherwise the ratio must reach
    /// the threshold.
    pub fn accepts(&self, ratio: f32) -> bool {
        if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }

    /// Record a new ratio. Returns the new intersecting state if it changed.
    pub fn update(&mut self, ratio: f32) -> Option<bool> {
        let now = self.accepts(ratio);
        if now == self.intersecting {
            return None;
        }
        self.intersecting = now;
        Some(now)
    }
}

/// Visible fraction of `layout` inside the viewport's root rectangle.
///
/// Zero-height elements count as fully visible when their top edge lies in
/// the root span.
pub fn intersection_ratio(layout: &LayoutBox, viewport: &Viewport, watch: &VisibilityWatch) -> f32 {
    let (root_top, root_bottom) = viewport.root_span(watch.margin_top, watch.margin_bottom);
    if layout.height <= 0.0 {
        return if layout.top >= root_top && layout.top < root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = layout.bottom().min(root_bottom) - layout.top.max(root_top);
    (overlap.max(0.0) / layout.height).clamp(0.0, 1.0)
}

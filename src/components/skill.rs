//! Skill bar components.
//!
//! A skill entry is an element carrying a `data-percent` attribute and three
//! sub-elements: the fill indicator, the numeric label and an optional level
//! label. The target percentage is parsed once, when the cascade launches,
//! and never changes while the fill animates.

use bevy_ecs::prelude::*;
use std::fmt;

use super::tween::Easing;

/// Data attribute holding an entry's target percentage.
pub const TARGET_ATTRIBUTE: &str = "percent";
/// Level label class before the fill settles.
pub const LEVEL_HIDDEN_CLASS: &str = "level-hidden";
/// Level label class once the fill has settled.
pub const LEVEL_VISIBLE_CLASS: &str = "level-visible";

/// Proficiency bucket derived from a target percentage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkillLevel {
    /// `target <= 40`
    Beginner,
    /// `40 < target <= 70`
    Intermediate,
    /// `target > 70`
    Advanced,
}

impl SkillLevel {
    pub fn from_target(target: u8) -> Self {
        match target {
            0..=40 => SkillLevel::Beginner,
            41..=70 => SkillLevel::Intermediate,
            _ => SkillLevel::Advanced,
        }
    }

    /// Text shown in the level label.
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Débutant",
            SkillLevel::Intermediate => "Intermédiaire",
            SkillLevel::Advanced => "Avancé",
        }
    }
}

/// Why an entry was left out of a cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// A referenced element does not exist.
    MissingElement(String),
    /// The target attribute is absent, not an integer, or outside 0..=100.
    MalformedData(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingElement(what) => write!(f, "missing element: {}", what),
            SkipReason::MalformedData(what) => write!(f, "malformed data: {}", what),
        }
    }
}

impl std::error::Error for SkipReason {}

/// A validated skill target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SkillEntry {
    pub target: u8,
}

impl SkillEntry {
    pub fn new(target: u8) -> Result<Self, SkipReason> {
        if target > 100 {
            return Err(SkipReason::MalformedData(format!(
                "target {} outside 0..=100",
                target
            )));
        }
        Ok(SkillEntry { target })
    }

    /// Parse the raw attribute value. Only plain integers in `0..=100` are
    /// accepted; surrounding whitespace is ignored.
    pub fn parse(raw: Option<&str>) -> Result<Self, SkipReason> {
        let Some(raw) = raw else {
            return Err(SkipReason::MalformedData(format!(
                "no data-{} attribute",
                TARGET_ATTRIBUTE
            )));
        };
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SkipReason::MalformedData(format!("'{}' is not an integer", raw)))?;
        if !(0..=100).contains(&value) {
            return Err(SkipReason::MalformedData(format!(
                "target {} outside 0..=100",
                value
            )));
        }
        SkillEntry::new(value as u8)
    }

    pub fn level(&self) -> SkillLevel {
        SkillLevel::from_target(self.target)
    }

    /// Eased value at normalized time `t`, in `0.0..=target`.
    pub fn value_at(&self, easing: Easing, t: f64) -> f64 {
        easing.interpolate(0.0, self.target as f64, t)
    }
}

/// Sub-elements of a skill entry. `None` means the markup lacks that part.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkillParts {
    pub fill: Option<Entity>,
    pub percent: Option<Entity>,
    pub level: Option<Entity>,
}

/// Fill animation of one cascade entry.
///
/// Elapsed time is measured from `started_at`, the first frame at or after
/// `start_at`, and recomputed every frame.
#[derive(Component, Clone, Debug)]
pub struct SkillFill {
    pub entry: SkillEntry,
    /// Position in the cascade.
    pub index: usize,
    pub container: Entity,
    /// Scheduled start in engine milliseconds.
    pub start_at: f64,
    pub duration: f64,
    pub easing: Easing,
    /// Frame timestamp at which the fill actually began.
    pub started_at: Option<f64>,
}

impl SkillFill {
    pub fn new(entry: SkillEntry, index: usize, container: Entity, start_at: f64, duration: f64) -> Self {
        SkillFill {
            entry,
            index,
            container,
            start_at,
            duration: duration.max(0.0),
            easing: Easing::CubicOut,
            started_at: None,
        }
    }

    /// Normalized progress at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        let Some(started) = self.started_at else {
            return 0.0;
        };
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - started) / self.duration).clamp(0.0, 1.0)
    }
}

/// Width written to the fill indicator for an in-flight value.
pub fn fill_width(value: f64) -> String {
    format!("{:.1}%", value)
}

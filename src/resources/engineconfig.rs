//! Engine configuration resource.
//!
//! Holds the observer thresholds, margins and cascade timings. Defaults match
//! the values the page has always used; an INI file can override any of them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [reveal]
//! threshold = 0.1
//! margin_bottom = -50
//! sticky = true
//! class = scrolled
//!
//! [cascade]
//! threshold = 0.3
//! step_delay_ms = 200
//! duration_ms = 2500
//!
//! [navigation]
//! section_offset = 100
//! header_threshold = 50
//! active_class = active
//! header_class = scrolled
//!
//! [viewport]
//! width = 1280
//! height = 720
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;
const DEFAULT_REVEAL_MARGIN_BOTTOM: f32 = -50.0;
const DEFAULT_STICKY_REVEAL: bool = true;
const DEFAULT_REVEAL_CLASS: &str = "scrolled";
const DEFAULT_CASCADE_THRESHOLD: f32 = 0.3;
const DEFAULT_STEP_DELAY_MS: u32 = 200;
const DEFAULT_DURATION_MS: u32 = 2500;
const DEFAULT_SECTION_OFFSET: f32 = 100.0;
const DEFAULT_HEADER_THRESHOLD: f32 = 50.0;
const DEFAULT_ACTIVE_CLASS: &str = "active";
const DEFAULT_HEADER_CLASS: &str = "scrolled";
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;
const DEFAULT_CONFIG_PATH: &str = "./revealengine.ini";

/// Recommended stagger range between cascade entries.
pub const STEP_DELAY_RANGE_MS: std::ops::RangeInclusive<u32> = 200..=400;

/// Engine configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Fraction of a revealed element that must be visible.
    pub reveal_threshold: f32,
    /// Bottom root margin for reveal watches, negative to trigger late.
    pub reveal_margin_bottom: f32,
    /// When false, elements are un-revealed after scrolling back out.
    pub sticky_reveal: bool,
    /// Class added to revealed elements.
    pub reveal_class: String,
    /// Fraction of the skills container that must be visible.
    pub cascade_threshold: f32,
    pub step_delay_ms: u32,
    pub duration_ms: u32,
    /// A section counts as current from this many pixels above its top.
    pub section_offset: f32,
    /// Scroll distance after which the header gets `header_class`.
    pub header_threshold: f32,
    /// Class of the navigation link of the current section.
    pub active_class: String,
    pub header_class: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self {
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_margin_bottom: DEFAULT_REVEAL_MARGIN_BOTTOM,
            sticky_reveal: DEFAULT_STICKY_REVEAL,
            reveal_class: DEFAULT_REVEAL_CLASS.to_string(),
            cascade_threshold: DEFAULT_CASCADE_THRESHOLD,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            duration_ms: DEFAULT_DURATION_MS,
            section_offset: DEFAULT_SECTION_OFFSET,
            header_threshold: DEFAULT_HEADER_THRESHOLD,
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            header_class: DEFAULT_HEADER_CLASS.to_string(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Out-of-range thresholds
    /// are clamped to `[0, 1]`.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [reveal] section
        if let Some(threshold) = config.getfloat("reveal", "threshold").ok().flatten() {
            self.reveal_threshold = (threshold as f32).clamp(0.0, 1.0);
        }
        if let Some(margin) = config.getfloat("reveal", "margin_bottom").ok().flatten() {
            self.reveal_margin_bottom = margin as f32;
        }
        if let Some(sticky) = config.getbool("reveal", "sticky").ok().flatten() {
            self.sticky_reveal = sticky;
        }
        if let Some(class) = config.get("reveal", "class") {
            self.reveal_class = class;
        }

        // [cascade] section
        if let Some(threshold) = config.getfloat("cascade", "threshold").ok().flatten() {
            self.cascade_threshold = (threshold as f32).clamp(0.0, 1.0);
        }
        if let Some(step) = config.getuint("cascade", "step_delay_ms").ok().flatten() {
            self.step_delay_ms = step as u32;
        }
        if let Some(duration) = config.getuint("cascade", "duration_ms").ok().flatten() {
            self.duration_ms = duration as u32;
        }

        // [navigation] section
        if let Some(offset) = config.getfloat("navigation", "section_offset").ok().flatten() {
            self.section_offset = offset as f32;
        }
        if let Some(threshold) = config.getfloat("navigation", "header_threshold").ok().flatten() {
            self.header_threshold = threshold as f32;
        }
        if let Some(class) = config.get("navigation", "active_class") {
            self.active_class = class;
        }
        if let Some(class) = config.get("navigation", "header_class") {
            self.header_class = class;
        }

        // [viewport] section
        if let Some(width) = config.getuint("viewport", "width").ok().flatten() {
            self.viewport_width = width as u32;
        }
        if let Some(height) = config.getuint("viewport", "height").ok().flatten() {
            self.viewport_height = height as u32;
        }

        if !STEP_DELAY_RANGE_MS.contains(&self.step_delay_ms) {
            warn!(
                "step_delay_ms={} is outside the usual {:?} range",
                self.step_delay_ms, STEP_DELAY_RANGE_MS
            );
        }

        info!(
            "Loaded config: reveal threshold={} margin={} sticky={}, cascade threshold={} step={}ms duration={}ms, viewport {}x{}",
            self.reveal_threshold,
            self.reveal_margin_bottom,
            self.sticky_reveal,
            self.cascade_threshold,
            self.step_delay_ms,
            self.duration_ms,
            self.viewport_width,
            self.viewport_height
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("reveal", "threshold", Some(self.reveal_threshold.to_string()));
        config.set(
            "reveal",
            "margin_bottom",
            Some(self.reveal_margin_bottom.to_string()),
        );
        config.set("reveal", "sticky", Some(self.sticky_reveal.to_string()));
        config.set("reveal", "class", Some(self.reveal_class.clone()));

        config.set(
            "cascade",
            "threshold",
            Some(self.cascade_threshold.to_string()),
        );
        config.set(
            "cascade",
            "step_delay_ms",
            Some(self.step_delay_ms.to_string()),
        );
        config.set("cascade", "duration_ms", Some(self.duration_ms.to_string()));

        config.set(
            "navigation",
            "section_offset",
            Some(self.section_offset.to_string()),
        );
        config.set(
            "navigation",
            "header_threshold",
            Some(self.header_threshold.to_string()),
        );
        config.set("navigation", "active_class", Some(self.active_class.clone()));
        config.set("navigation", "header_class", Some(self.header_class.clone()));

        config.set("viewport", "width", Some(self.viewport_width.to_string()));
        config.set("viewport", "height", Some(self.viewport_height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

//! Page layout description.
//!
//! A [`PageLayoutData`] is the JSON form of the page the engine animates:
//! every element with its box and attributes, and the skills section that
//! drives the cascade. [`crate::systems::pagelayout::spawn_page`] turns it into
//! entities.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "elements": [
//!     { "id": "about", "classes": ["scroll-element"], "top": 900, "height": 400 },
//!     { "id": "skill-rust", "top": 1700, "height": 40, "data": { "percent": "85" } },
//!     { "id": "skill-rust-fill", "top": 1720, "height": 8 }
//!   ],
//!   "skills": {
//!     "container": "skills",
//!     "entries": [
//!       { "id": "skill-rust", "fill": "skill-rust-fill", "percent": "skill-rust-pct", "level": "skill-rust-level" }
//!     ]
//!   },
//!   "counters": [ { "id": "projects-count", "end": 42 } ],
//!   "navigation": {
//!     "header": "header",
//!     "links": [ { "id": "nav-about", "section": "about" } ]
//!   }
//! }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageLayoutData {
    pub elements: Vec<ElementData>,
    #[serde(default)]
    pub skills: Option<SkillsData>,
    #[serde(default)]
    pub counters: Vec<CounterData>,
    #[serde(default)]
    pub navigation: Option<NavigationData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ElementData {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    pub top: f32,
    pub height: f32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub data: FxHashMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SkillsData {
    /// Id of the section whose visibility launches the cascade.
    pub container: String,
    pub entries: Vec<SkillEntryData>,
    #[serde(default)]
    pub step_delay_ms: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u32>,
}

/// Element ids making up one skill entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SkillEntryData {
    pub id: String,
    pub fill: String,
    pub percent: String,
    #[serde(default)]
    pub level: Option<String>,
}

/// Counter animated alongside the cascade.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CounterData {
    pub id: String,
    #[serde(default)]
    pub start: i64,
    pub end: i64,
    #[serde(default = "default_counter_duration")]
    pub duration_ms: f64,
}

fn default_counter_duration() -> f64 {
    2000.0
}

/// Header and navigation links that follow the scroll position.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NavigationData {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub links: Vec<NavLinkData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NavLinkData {
    pub id: String,
    /// Id of the section the link points at.
    pub section: String,
}

impl PageLayoutData {
    /// Loads a page layout from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json(&file_content)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let layout_data: PageLayoutData = serde_json::from_str(json)?;
        Ok(layout_data)
    }

    /// Lowest document y reached by any element.
    pub fn page_height(&self) -> f32 {
        self.elements
            .iter()
            .map(|e| e.top + e.height.max(0.0))
            .fold(0.0, f32::max)
    }
}

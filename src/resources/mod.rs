//! ECS resources shared by the engine's systems.
//!
//! Overview
//! - `activesection` – section highlighted in the navigation
//! - `elementindex` – element lookup by DOM id
//! - `engineconfig` – thresholds, margins and cascade timings from INI
//! - `hostcapabilities` – which host primitives are available
//! - `viewport` – visible window onto the page and scroll offset
//! - `worldtime` – engine clock in milliseconds
pub mod activesection;
pub mod elementindex;
pub mod engineconfig;
pub mod hostcapabilities;
pub mod viewport;
pub mod worldtime;

//! Engine systems and observers.
//!
//! Submodules overview
//! - [`cascade`] – launch cascades on first intersection, track their state
//! - [`counter`] – advance value counters
//! - [`intersection`] – test watches against the viewport, emit transitions
//! - [`navigation`] – active navigation link and header class
//! - [`pagelayout`] – spawn entities from a page layout
//! - [`reveal`] – apply and revert reveals
//! - [`skillfill`] – eased per-frame skill fills and final snap
//! - [`time`] – advance the engine clock

pub mod cascade;
pub mod counter;
pub mod intersection;
pub mod navigation;
pub mod pagelayout;
pub mod reveal;
pub mod skillfill;
pub mod time;

//! Event types exchanged between the engine's systems and observers.
//!
//! Submodules:
//! - [`cascade`] – cascade launch and per-entry fill progress
//! - [`intersection`] – visibility changes of watched elements
//! - [`navigation`] – active section changes
//! - [`reveal`] – reveal and un-reveal of watched elements
pub mod cascade;
pub mod intersection;
pub mod navigation;
pub mod reveal;

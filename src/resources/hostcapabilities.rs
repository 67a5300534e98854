//! Host capability flags.
//!
//! Hosts that cannot deliver visibility notifications clear
//! `intersection_supported`; watch registration then degrades to revealing
//! and filling immediately so nothing stays hidden forever.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct HostCapabilities {
    pub intersection_supported: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        HostCapabilities {
            intersection_supported: true,
        }
    }
}

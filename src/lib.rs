//! Fruit Fall - a catch-the-falling-fruit arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collision outcomes)
//! - `audio`: Sound cue catalog and the playback collaborator seam
//! - `store`: External score/lives state store contract
//! - `config`: Data-driven game tuning

pub mod audio;
pub mod config;
pub mod sim;
pub mod store;

pub use audio::{AudioSink, Cue, LogAudio, NullAudio};
pub use config::GameConfig;
pub use store::{MemoryStore, Store, StoreEvent};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Simulation ticks per second
    pub const TICK_HZ: u32 = 120;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player bounding-box half extents
    pub const PLAYER_HALF_WIDTH: f32 = 24.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 36.0;

    /// Falling item bounding-box half extent (square)
    pub const ITEM_HALF_EXTENT: f32 = 16.0;
    /// Vertical center at which items spawn
    pub const ITEM_SPAWN_Y: f32 = 50.0;

    /// Ground line offset from the bottom edge of the viewport
    pub const GROUND_OFFSET: f32 = 1.0;
}

/// Logical canvas size supplied by the hosting shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when there is no drawable area to simulate into
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Convert a millisecond delay to whole simulation ticks
///
/// Rounds up so a nonzero delay never collapses to zero ticks.
#[inline]
pub fn ticks_from_ms(ms: u32) -> u64 {
    (u64::from(ms) * u64::from(consts::TICK_HZ)).div_ceil(1000)
}

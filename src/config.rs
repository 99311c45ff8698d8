//! Game tuning
//!
//! All pacing and balance values live here so a hosting shell can override
//! them from a JSON file without touching simulation code.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable game parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Lives at session start
    pub initial_lives: u32,
    /// Horizontal player speed, units/s
    pub player_speed: f32,
    /// Constant downward acceleration on falling items, units/s²
    pub item_gravity: f32,
    /// Spawn interval at score 0, ms
    pub base_spawn_delay_ms: u32,
    /// Spawn interval floor; pacing never tightens past this, ms
    pub min_spawn_delay_ms: u32,
    /// Delay before the very first spawn, ms
    pub first_spawn_delay_ms: u32,
    /// Time a missed item stays on screen before the life is deducted, ms
    pub miss_grace_ms: u32,
    /// Points awarded per caught item
    pub catch_score: u32,
    /// Fraction of the viewport width treated as the unreachable edge zone
    pub edge_margin_frac: f32,
    /// Maximum inward nudge applied to an edge-zone spawn, units
    pub edge_nudge_max: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            player_speed: 330.0,
            item_gravity: 20.0,
            base_spawn_delay_ms: 3000,
            min_spawn_delay_ms: 1500,
            first_spawn_delay_ms: 10,
            miss_grace_ms: 2000,
            catch_score: 1,
            edge_margin_frac: 0.025,
            edge_nudge_max: 100.0,
        }
    }
}

impl GameConfig {
    /// Load config from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

//! Falling-item spawning
//!
//! Placement, the edge-avoidance jitter, and the difficulty pacing formula.
//! The self-rescheduling half of spawning lives in the tick loop, which
//! re-arms a `Task::SpawnItem` after every spawn.

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::consts::ITEM_SPAWN_Y;

use super::entity::{EntityId, FallingItem, ItemKind};

/// Spawn interval for the given score, ms
///
/// Pacing tightens linearly as score grows and is floored so spawning never
/// becomes instantaneous: `max(min_delay, base_delay - score)`.
pub fn next_delay_ms(config: &GameConfig, score: u64) -> u32 {
    let pressure = u32::try_from(score).unwrap_or(u32::MAX);
    config
        .base_spawn_delay_ms
        .saturating_sub(pressure)
        .max(config.min_spawn_delay_ms)
}

/// Sample a horizontal spawn position with edge avoidance
///
/// A raw sample within the edge zone (2.5% of the width by default) is
/// nudged inward by a random offset so items never spawn where the player
/// cannot reach them; the result always stays inside `[0, width)`.
pub fn spawn_x(rng: &mut impl Rng, config: &GameConfig, viewport_width: f32) -> f32 {
    let raw = rng.random_range(0.0..viewport_width);
    let margin = viewport_width * config.edge_margin_frac;

    let x = if raw < margin {
        raw + rng.random_range(0.0..config.edge_nudge_max)
    } else if raw > viewport_width - margin {
        raw - rng.random_range(0.0..config.edge_nudge_max)
    } else {
        raw
    };

    x.clamp(0.0, (viewport_width - 1.0).max(0.0))
}

/// Create a new falling item at the top of the screen
pub fn spawn_item(
    rng: &mut impl Rng,
    config: &GameConfig,
    viewport_width: f32,
    id: EntityId,
) -> FallingItem {
    let kind = ItemKind::CATALOG[rng.random_range(0..ItemKind::CATALOG.len())];
    let x = spawn_x(rng, config, viewport_width);
    FallingItem::new(id, kind, Vec2::new(x, ITEM_SPAWN_Y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pacing_formula() {
        let config = GameConfig::default();
        assert_eq!(next_delay_ms(&config, 0), 3000);
        assert_eq!(next_delay_ms(&config, 500), 2500);
        assert_eq!(next_delay_ms(&config, 1500), 1500);
        // floored past the cap
        assert_eq!(next_delay_ms(&config, 2000), 1500);
        assert_eq!(next_delay_ms(&config, u64::MAX), 1500);
    }

    #[test]
    fn test_spawn_starts_at_rest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = GameConfig::default();
        let item = spawn_item(&mut rng, &config, 800.0, 42);
        assert_eq!(item.entity.id, 42);
        assert_eq!(item.entity.pos.y, ITEM_SPAWN_Y);
        assert_eq!(item.entity.vel, Vec2::ZERO);
        assert!(item.entity.is_active());
    }

    #[test]
    fn test_all_kinds_eventually_spawn() {
        let mut rng = Pcg32::seed_from_u64(2);
        let config = GameConfig::default();
        let mut seen = std::collections::HashSet::new();
        for id in 0..500 {
            seen.insert(spawn_item(&mut rng, &config, 800.0, id).kind);
        }
        assert_eq!(seen.len(), ItemKind::CATALOG.len());
    }

    proptest! {
        #[test]
        fn prop_next_delay_floored(score in 0u64..100_000) {
            let config = GameConfig::default();
            let delay = next_delay_ms(&config, score);
            prop_assert!(delay >= config.min_spawn_delay_ms);
            prop_assert!(delay <= config.base_spawn_delay_ms);
        }

        #[test]
        fn prop_next_delay_monotone(a in 0u64..100_000, b in 0u64..100_000) {
            let config = GameConfig::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(next_delay_ms(&config, hi) <= next_delay_ms(&config, lo));
        }

        #[test]
        fn prop_spawn_x_in_bounds(seed in 0u64..u64::MAX, width in 100.0f32..4000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let config = GameConfig::default();
            let x = spawn_x(&mut rng, &config, width);
            prop_assert!(x >= 0.0);
            prop_assert!(x < width);
        }
    }
}

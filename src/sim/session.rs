//! Scene lifecycle and the session context
//!
//! The `Session` is the explicit context object every component hangs off.
//! There is no global simulation instance; several sessions can run side by
//! side, and teardown is an ordinary method.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::{AudioSink, Cue};
use crate::config::GameConfig;
use crate::consts::*;
use crate::store::Store;
use crate::{Viewport, ticks_from_ms};

use super::bridge::StateBridge;
use super::entity::{EntityId, FallingItem, Player};
use super::scheduler::{Scheduler, Task};

/// Terminal message shown when the last life is lost
pub const GAME_OVER_TEXT: &str = "Game Over.";

/// Scene lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Collaborators not yet wired
    Loading,
    /// Per-frame ticks active, spawner armed
    Running,
    /// Terminal for this session; the clock is frozen
    GameOver,
}

/// Fatal startup errors; nothing at runtime ever surfaces as an `Err`
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("viewport has no drawable area ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// One game session: entities, timers, collaborators, and the phase machine
pub struct Session {
    pub config: GameConfig,
    pub viewport: Viewport,
    /// Y position of the miss line, repositioned on resize
    pub ground_y: f32,
    pub phase: Phase,
    /// Simulation tick counter
    pub ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    /// In-flight items (sorted by id for determinism)
    pub items: Vec<FallingItem>,
    pub scheduler: Scheduler,
    pub bridge: StateBridge,
    pub(crate) audio: Box<dyn AudioSink>,
    pub(crate) rng: Pcg32,
    game_over_message: Option<String>,
    next_id: EntityId,
}

impl Session {
    /// Wire up a new session and arm the first spawn
    ///
    /// Fails fast on a missing drawable area or inconsistent tuning; these
    /// are the only errors this crate ever returns.
    pub fn create(
        config: GameConfig,
        viewport: Viewport,
        store: Box<dyn Store>,
        mut audio: Box<dyn AudioSink>,
        seed: u64,
    ) -> Result<Self, CreateError> {
        if viewport.is_empty() {
            return Err(CreateError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if config.initial_lives == 0 {
            return Err(CreateError::InvalidConfig("initial_lives must be at least 1"));
        }
        if config.min_spawn_delay_ms > config.base_spawn_delay_ms {
            return Err(CreateError::InvalidConfig(
                "min_spawn_delay_ms exceeds base_spawn_delay_ms",
            ));
        }
        if config.player_speed <= 0.0 {
            return Err(CreateError::InvalidConfig("player_speed must be positive"));
        }

        audio.play(Cue::Btn);

        let ground_y = viewport.height - GROUND_OFFSET;
        let mut next_id: EntityId = 1;
        let player_id = next_id;
        next_id += 1;

        // the player enters at the left edge, standing on the ground line
        let mut player = Player::new(
            player_id,
            Vec2::new(0.0, ground_y - PLAYER_HALF_HEIGHT),
        );
        player.clamp_to(viewport.width);

        let mut session = Self {
            config,
            viewport,
            ground_y,
            phase: Phase::Loading,
            ticks: 0,
            seed,
            player,
            items: Vec::new(),
            scheduler: Scheduler::new(),
            bridge: StateBridge::new(store, config.initial_lives),
            audio,
            rng: Pcg32::seed_from_u64(seed),
            game_over_message: None,
            next_id,
        };

        session.scheduler.schedule(
            0,
            ticks_from_ms(session.config.first_spawn_delay_ms),
            Task::SpawnItem,
        );
        session.phase = Phase::Running;

        log::info!(
            "session created: seed {seed}, viewport {}x{}, {} lives",
            viewport.width,
            viewport.height,
            config.initial_lives
        );
        Ok(session)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// React to a viewport change: move the ground line, re-seat the player
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            log::warn!(
                "ignoring resize to empty viewport {}x{}",
                viewport.width,
                viewport.height
            );
            return;
        }
        self.viewport = viewport;
        self.ground_y = viewport.height - GROUND_OFFSET;
        self.player.entity.pos.y = self.ground_y - self.player.entity.half.y;
        self.player.clamp_to(viewport.width);
        log::info!("resized to {}x{}", viewport.width, viewport.height);
    }

    /// Tear the scene down: cancel timers, release entities, freeze
    ///
    /// Every scheduled callback dies here, so nothing can fire into a
    /// destroyed scene; later `tick` calls are no-ops.
    pub fn teardown(&mut self) {
        let canceled = self.scheduler.pending();
        self.scheduler.cancel_all();
        self.items.clear();
        self.phase = Phase::GameOver;
        log::info!("session torn down ({canceled} pending timers canceled)");
    }

    /// Enter the terminal phase after the last life is lost
    ///
    /// Pending timers stay queued but frozen; only teardown cancels them.
    pub(crate) fn trigger_game_over(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.game_over_message = Some(GAME_OVER_TEXT.to_string());
        log::info!("game over at score {}", self.bridge.score());
    }

    /// Terminal message for the UI collaborator, if the session ended
    pub fn game_over_message(&self) -> Option<&str> {
        self.game_over_message.as_deref()
    }

    /// Ensure items are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|i| i.entity.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::store::MemoryStore;

    fn create_session(viewport: Viewport) -> Result<Session, CreateError> {
        Session::create(
            GameConfig::default(),
            viewport,
            Box::new(MemoryStore::new(3)),
            Box::new(NullAudio),
            7,
        )
    }

    #[test]
    fn test_create_rejects_empty_viewport() {
        let Err(err) = create_session(Viewport::new(0.0, 600.0)) else {
            panic!("expected startup to fail");
        };
        assert!(matches!(err, CreateError::EmptyViewport { .. }));
    }

    #[test]
    fn test_create_rejects_bad_config() {
        let config = GameConfig {
            initial_lives: 0,
            ..GameConfig::default()
        };
        let Err(err) = Session::create(
            config,
            Viewport::new(800.0, 600.0),
            Box::new(MemoryStore::new(0)),
            Box::new(NullAudio),
            7,
        ) else {
            panic!("expected startup to fail");
        };
        assert!(matches!(err, CreateError::InvalidConfig(_)));
    }

    #[test]
    fn test_create_arms_first_spawn() {
        let session = create_session(Viewport::new(800.0, 600.0)).unwrap();
        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.scheduler.pending(), 1);
        assert!(session.items.is_empty());
        assert_eq!(session.ground_y, 599.0);
    }

    #[test]
    fn test_resize_reseats_ground_and_player() {
        let mut session = create_session(Viewport::new(800.0, 600.0)).unwrap();
        session.player.entity.pos.x = 790.0;
        session.resize(Viewport::new(400.0, 300.0));

        assert_eq!(session.ground_y, 299.0);
        assert_eq!(
            session.player.entity.pos.y,
            299.0 - session.player.entity.half.y
        );
        // clamped back inside the narrower viewport
        assert!(session.player.entity.pos.x <= 400.0 - session.player.entity.half.x);
    }

    #[test]
    fn test_teardown_cancels_and_releases() {
        let mut session = create_session(Viewport::new(800.0, 600.0)).unwrap();
        let id = session.next_entity_id();
        session.items.push(FallingItem::new(
            id,
            crate::sim::entity::ItemKind::Peach,
            Vec2::new(100.0, 100.0),
        ));

        session.teardown();
        assert_eq!(session.scheduler.pending(), 0);
        assert!(session.items.is_empty());
        assert_eq!(session.phase, Phase::GameOver);
        assert!(session.game_over_message().is_none());
    }
}

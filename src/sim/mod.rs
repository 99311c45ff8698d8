//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Deferred work goes through the cancellable scheduler, never wall-clock
//! - No rendering or platform dependencies

pub mod bridge;
pub mod collision;
pub mod entity;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod spawner;
pub mod tick;

pub use bridge::StateBridge;
pub use entity::{Aabb, Entity, EntityId, Facing, FallingItem, ItemKind, ItemState, Player};
pub use resolver::{Outcome, Resolution};
pub use scheduler::{Scheduler, Task, TaskId};
pub use session::{CreateError, GAME_OVER_TEXT, Phase, Session};
pub use tick::{TickInput, tick};

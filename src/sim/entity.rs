//! Entities and core simulation types
//!
//! Both the player and falling items share one physics-driven `Entity` core:
//! position, velocity, bounding box, and the one-shot resolution guard.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Entity identifier, unique within a session
pub type EntityId = u32;

/// Axis-aligned bounding box (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Overlap test, touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
    }

    /// Lowest edge of the box (y grows downward)
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }
}

/// Shared physics-driven actor core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub half: Vec2,
    /// Whether the entity still participates in collision checks
    pub active: bool,
    resolved: bool,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, half: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            half,
            active: true,
            resolved: false,
        }
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vel = Vec2::new(vx, vy);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Claim the right to resolve this entity's outcome
    ///
    /// Returns `true` only on the first call. Whichever outcome path wins
    /// this call owns the entity's destruction and state dispatch; every
    /// later caller must do nothing.
    pub fn mark_resolved(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }
}

/// Catalog of spawnable item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Apple,
    Avocado,
    Bread,
    Brownie,
    Cheese,
    Cookie,
    HoneydewMelon,
    Watermelon,
    Peach,
    LemonPie,
    Lemon,
    Onion,
}

impl ItemKind {
    /// Every spawnable kind, drawn from uniformly by the spawner
    pub const CATALOG: [ItemKind; 12] = [
        ItemKind::Apple,
        ItemKind::Avocado,
        ItemKind::Bread,
        ItemKind::Brownie,
        ItemKind::Cheese,
        ItemKind::Cookie,
        ItemKind::HoneydewMelon,
        ItemKind::Watermelon,
        ItemKind::Peach,
        ItemKind::LemonPie,
        ItemKind::Lemon,
        ItemKind::Onion,
    ];

    /// Atlas name for this kind
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Apple => "Apple",
            ItemKind::Avocado => "Avocado",
            ItemKind::Bread => "Bread",
            ItemKind::Brownie => "Brownie",
            ItemKind::Cheese => "Cheese",
            ItemKind::Cookie => "Cookie",
            ItemKind::HoneydewMelon => "MelonHoneydew",
            ItemKind::Watermelon => "MelonWater",
            ItemKind::Peach => "Peach",
            ItemKind::LemonPie => "PieLemon",
            ItemKind::Lemon => "Lemon",
            ItemKind::Onion => "Onion",
        }
    }

    /// Atlas frame path for the rendering collaborator
    pub fn frame_name(self) -> String {
        format!("fruits/{}.png", self.name())
    }
}

/// Falling item lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    /// In flight, participating in collision checks
    Falling,
    /// Caught by the player, removed at the end of the tick
    Caught,
    /// Reached the ground; stays tinted on screen until the grace window ends
    Missed,
}

/// A spawned falling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub entity: Entity,
    pub kind: ItemKind,
    pub state: ItemState,
}

impl FallingItem {
    pub fn new(id: EntityId, kind: ItemKind, pos: Vec2) -> Self {
        Self {
            entity: Entity::new(id, pos, Vec2::splat(ITEM_HALF_EXTENT)),
            kind,
            state: ItemState::Falling,
        }
    }
}

/// Player facing / movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Idle,
    MovingLeft,
    MovingRight,
}

impl Facing {
    /// Looping animation key for the rendering collaborator
    pub fn anim_key(self) -> &'static str {
        match self {
            Facing::Idle => "player_idle",
            Facing::MovingLeft => "player_move_left",
            Facing::MovingRight => "player_move_right",
        }
    }
}

/// The player's character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub entity: Entity,
    pub facing: Facing,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            entity: Entity::new(id, pos, Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT)),
            facing: Facing::Idle,
        }
    }

    /// Apply the facing decided from this tick's input
    ///
    /// Velocity is always overwritten (a pure function of current input, no
    /// carry-over). Returns `true` when the facing changed and the looping
    /// animation must restart; re-asserting the current facing is a no-op.
    pub fn set_facing(&mut self, facing: Facing, speed: f32) -> bool {
        let vx = match facing {
            Facing::MovingRight => speed,
            Facing::MovingLeft => -speed,
            Facing::Idle => 0.0,
        };
        self.entity.set_velocity(vx, 0.0);
        if self.facing == facing {
            return false;
        }
        self.facing = facing;
        true
    }

    /// Keep the player inside the horizontal world bounds
    pub fn clamp_to(&mut self, viewport_width: f32) {
        let min_x = self.entity.half.x;
        let max_x = (viewport_width - self.entity.half.x).max(min_x);
        self.entity.pos.x = self.entity.pos.x.clamp(min_x, max_x);
    }
}

//! Fixed timestep simulation tick
//!
//! One tick multiplexes every logical timeline onto the same loop: player
//! input, due timers (spawns, miss grace windows), physics integration, and
//! the overlap scan feeding the resolution queue. Nothing here blocks.

use crate::ticks_from_ms;

use super::entity::{EntityId, Facing, ItemState};
use super::resolver;
use super::scheduler::Task;
use super::session::{Phase, Session};
use super::spawner;

/// Input state for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// "move-left" input held
    pub move_left: bool,
    /// "move-right" input held
    pub move_right: bool,
    /// Demo mode - steer the player automatically
    pub auto_play: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    // terminal phases freeze the clock; pending timers never fire again
    if session.phase != Phase::Running {
        return;
    }
    session.ticks += 1;

    let mut input = input.clone();
    if input.auto_play {
        steer_auto_play(session, &mut input);
    }
    let input = &input;

    // player controller: held right wins over held left, velocity is a pure
    // function of this tick's input
    let facing = if input.move_right {
        Facing::MovingRight
    } else if input.move_left {
        Facing::MovingLeft
    } else {
        Facing::Idle
    };
    if session.player.set_facing(facing, session.config.player_speed) {
        log::debug!("player animation -> {}", facing.anim_key());
    }

    // due timers: spawns and deferred miss completions
    for task in session.scheduler.drain_due(session.ticks) {
        match task {
            Task::SpawnItem => spawn_and_reschedule(session),
            Task::FinishMiss { item } => finish_miss(session, item),
        }
    }

    // integrate
    session.player.entity.pos.x += session.player.entity.vel.x * dt;
    session.player.clamp_to(session.viewport.width);
    for item in &mut session.items {
        if item.state != ItemState::Falling {
            continue;
        }
        item.entity.vel.y += session.config.item_gravity * dt;
        item.entity.pos.y += item.entity.vel.y * dt;
    }

    // overlap watches -> resolution queue -> at-most-once outcomes
    let events = resolver::scan(&session.player, &session.items, session.ground_y);
    resolver::apply(
        &events,
        &mut session.items,
        &mut session.bridge,
        session.audio.as_mut(),
        &mut session.scheduler,
        session.ticks,
        &session.config,
    );

    // caught items vanish the same tick; missed ones wait out their grace
    session.items.retain(|i| i.state != ItemState::Caught);

    if session.bridge.is_game_over() {
        session.trigger_game_over();
        return;
    }

    // ensure deterministic ordering
    session.normalize_order();
}

/// Demo mode: chase the item closest to the ground line
fn steer_auto_play(session: &Session, input: &mut TickInput) {
    let target = session
        .items
        .iter()
        .filter(|i| i.state == ItemState::Falling)
        .max_by(|a, b| {
            a.entity
                .pos
                .y
                .partial_cmp(&b.entity.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|i| i.entity.pos.x);

    input.move_left = false;
    input.move_right = false;
    let Some(target_x) = target else { return };

    let deadzone = 4.0;
    let player_x = session.player.entity.pos.x;
    if target_x > player_x + deadzone {
        input.move_right = true;
    } else if target_x < player_x - deadzone {
        input.move_left = true;
    }
}

/// Create the next item and re-arm the spawn timer
///
/// Spawning does not wait for earlier items to resolve, so several items
/// can be in flight at once. The next interval is computed from the score
/// at schedule time.
fn spawn_and_reschedule(session: &mut Session) {
    let id = session.next_entity_id();
    let item = spawner::spawn_item(
        &mut session.rng,
        &session.config,
        session.viewport.width,
        id,
    );
    log::debug!(
        "spawned {} #{id} at x={:.1}",
        item.kind.name(),
        item.entity.pos.x
    );
    session.items.push(item);

    let delay_ms = spawner::next_delay_ms(&session.config, session.bridge.score());
    session
        .scheduler
        .schedule(session.ticks, ticks_from_ms(delay_ms), Task::SpawnItem);
}

/// End of a missed item's grace window: deduct the life, drop the item
fn finish_miss(session: &mut Session, id: EntityId) {
    // the item may already be gone; a stale completion is a no-op
    let Some(index) = session
        .items
        .iter()
        .position(|i| i.entity.id == id && i.state == ItemState::Missed)
    else {
        log::debug!("stale miss completion for item {id}");
        return;
    };
    session.items.swap_remove(index);
    session.bridge.take_life();
}

//! Collision outcome resolution
//!
//! Each falling item is bound to two mutually exclusive outcomes: caught by
//! the player or missed to the ground. The scan emits explicit resolution
//! records into a queue, drained once per tick; the entity's one-shot
//! resolve guard makes applying an outcome at-most-once even if duplicate
//! records ever reach the queue.

use crate::audio::{AudioSink, Cue};
use crate::config::GameConfig;
use crate::ticks_from_ms;

use super::bridge::StateBridge;
use super::collision;
use super::entity::{EntityId, FallingItem, ItemState, Player};
use super::scheduler::{Scheduler, Task};

/// Terminal fate of a falling item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Caught,
    Missed,
}

/// One queued outcome record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub item: EntityId,
    pub outcome: Outcome,
}

/// Scan every live item against both overlap watches
///
/// Items are visited in id order and produce at most one record each. The
/// player overlap is checked first, so an item overlapping the player and
/// the ground line on the same tick resolves as a catch: the tie-break is
/// deterministic queue ordering, not physics-engine iteration order.
pub fn scan(player: &Player, items: &[FallingItem], ground_y: f32) -> Vec<Resolution> {
    let player_bounds = player.entity.bounds();
    let mut queue = Vec::new();

    for item in items {
        if !item.entity.is_active() || item.state != ItemState::Falling {
            continue;
        }
        let bounds = item.entity.bounds();
        if collision::player_catches_item(&player_bounds, &bounds) {
            queue.push(Resolution {
                item: item.entity.id,
                outcome: Outcome::Caught,
            });
        } else if collision::item_hits_ground(&bounds, ground_y) {
            queue.push(Resolution {
                item: item.entity.id,
                outcome: Outcome::Missed,
            });
        }
    }
    queue
}

/// Drain the resolution queue, applying each winning outcome
///
/// A record whose item is gone, or whose resolve guard was already claimed,
/// is dropped without effect. A catch scores and deactivates the item; the
/// tick loop removes it the same tick. A miss deactivates and tints the
/// item, deferring the life deduction and removal by the grace window.
pub fn apply(
    events: &[Resolution],
    items: &mut [FallingItem],
    bridge: &mut StateBridge,
    audio: &mut dyn AudioSink,
    scheduler: &mut Scheduler,
    now: u64,
    config: &GameConfig,
) {
    for event in events {
        let Some(item) = items.iter_mut().find(|i| i.entity.id == event.item) else {
            log::debug!("dropping resolution for missing item {}", event.item);
            continue;
        };
        if !item.entity.mark_resolved() {
            continue;
        }

        match event.outcome {
            Outcome::Caught => {
                audio.play(Cue::Collect);
                item.entity.active = false;
                item.entity.set_velocity(0.0, 0.0);
                item.state = ItemState::Caught;
                bridge.add_score(config.catch_score);
                log::debug!("caught {} #{}", item.kind.name(), item.entity.id);
            }
            Outcome::Missed => {
                audio.play(Cue::Fail);
                item.entity.active = false;
                item.entity.set_velocity(0.0, 0.0);
                item.state = ItemState::Missed;
                scheduler.schedule(
                    now,
                    ticks_from_ms(config.miss_grace_ms),
                    Task::FinishMiss {
                        item: item.entity.id,
                    },
                );
                log::debug!("missed {} #{}", item.kind.name(), item.entity.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueLog;
    use crate::sim::entity::ItemKind;
    use crate::store::MemoryStore;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn harness() -> (Player, StateBridge, Rc<RefCell<MemoryStore>>, CueLog, Scheduler) {
        let store = Rc::new(RefCell::new(MemoryStore::new(3)));
        let bridge = StateBridge::new(Box::new(store.clone()), 3);
        let player = Player::new(1, Vec2::new(400.0, 763.0));
        (player, bridge, store, CueLog::default(), Scheduler::new())
    }

    fn item_at(id: EntityId, pos: Vec2) -> FallingItem {
        FallingItem::new(id, ItemKind::Apple, pos)
    }

    #[test]
    fn test_catch_scores_without_life_loss() {
        let (player, mut bridge, store, mut cues, mut scheduler) = harness();
        let mut items = vec![item_at(2, player.entity.pos)];
        let config = GameConfig::default();

        let events = scan(&player, &items, 799.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, Outcome::Caught);

        apply(&events, &mut items, &mut bridge, &mut cues, &mut scheduler, 1, &config);

        assert_eq!(store.borrow().score, 1);
        assert_eq!(store.borrow().lives, 3);
        assert_eq!(items[0].state, ItemState::Caught);
        assert!(!items[0].entity.is_active());
        assert_eq!(cues.cues, vec![Cue::Collect]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_miss_defers_life_loss() {
        let (player, mut bridge, store, mut cues, mut scheduler) = harness();
        let mut items = vec![item_at(2, Vec2::new(100.0, 799.0))];
        let config = GameConfig::default();

        let events = scan(&player, &items, 799.0);
        assert_eq!(events, vec![Resolution { item: 2, outcome: Outcome::Missed }]);

        apply(&events, &mut items, &mut bridge, &mut cues, &mut scheduler, 1, &config);

        // nothing dispatched yet; the deduction waits out the grace window
        assert_eq!(store.borrow().lives, 3);
        assert_eq!(items[0].state, ItemState::Missed);
        assert_eq!(cues.cues, vec![Cue::Fail]);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_double_overlap_resolves_exactly_once() {
        // item overlapping the player AND the ground line on the same tick:
        // the catch wins the tie and nothing else fires
        let (player, mut bridge, store, mut cues, mut scheduler) = harness();
        let mut items = vec![item_at(2, Vec2::new(player.entity.pos.x, 799.0))];
        let config = GameConfig::default();

        let events = scan(&player, &items, 799.0);
        assert_eq!(events, vec![Resolution { item: 2, outcome: Outcome::Caught }]);

        apply(&events, &mut items, &mut bridge, &mut cues, &mut scheduler, 1, &config);

        assert_eq!(store.borrow().score, 1);
        assert_eq!(store.borrow().lives, 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_resolve_guard_blocks_second_outcome() {
        let (player, mut bridge, store, mut cues, mut scheduler) = harness();
        let mut items = vec![item_at(2, player.entity.pos)];
        let config = GameConfig::default();

        // both outcomes queued for the same item, as if two watches fired
        let events = vec![
            Resolution { item: 2, outcome: Outcome::Caught },
            Resolution { item: 2, outcome: Outcome::Missed },
        ];
        apply(&events, &mut items, &mut bridge, &mut cues, &mut scheduler, 1, &config);

        assert_eq!(store.borrow().score, 1);
        assert_eq!(store.borrow().lives, 3);
        assert_eq!(items[0].state, ItemState::Caught);
        assert_eq!(cues.cues, vec![Cue::Collect]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_inactive_items_are_not_scanned() {
        let (player, _bridge, _store, _cues, _scheduler) = harness();
        let mut item = item_at(2, player.entity.pos);
        item.entity.active = false;
        assert!(scan(&player, &[item], 799.0).is_empty());
    }

    #[test]
    fn test_stale_record_is_a_no_op() {
        let (_player, mut bridge, store, mut cues, mut scheduler) = harness();
        let mut items: Vec<FallingItem> = Vec::new();
        let config = GameConfig::default();

        let events = vec![Resolution { item: 99, outcome: Outcome::Missed }];
        apply(&events, &mut items, &mut bridge, &mut cues, &mut scheduler, 1, &config);

        assert_eq!(store.borrow().lives, 3);
        assert!(cues.cues.is_empty());
        assert_eq!(scheduler.pending(), 0);
    }
}

//! Game state bridge
//!
//! Translates resolved outcomes into dispatches against the external store
//! and owns the life-exhaustion terminal condition. Score and lives are
//! mirrored locally; the store is write-only from the simulation's side.

use crate::store::{Store, StoreEvent};

/// Bridge between outcome resolution and the external score/lives store
pub struct StateBridge {
    store: Box<dyn Store>,
    score: u64,
    lives: u32,
    game_over: bool,
}

impl StateBridge {
    pub fn new(store: Box<dyn Store>, initial_lives: u32) -> Self {
        Self {
            store,
            score: 0,
            lives: initial_lives,
            game_over: false,
        }
    }

    /// Dispatch `AddScore(amount)` for a caught item
    ///
    /// Silently dropped once the session is over; a deferred callback may
    /// still fire on the same tick the last life was lost.
    pub fn add_score(&mut self, amount: u32) {
        debug_assert!(amount > 0, "score amounts are positive");
        if self.game_over {
            log::debug!("dropping AddScore({amount}) after game over");
            return;
        }
        self.score += u64::from(amount);
        self.store.dispatch(StoreEvent::AddScore(amount));
    }

    /// Dispatch `TakeLife` for a missed item
    ///
    /// Returns `true` when this call exhausted the last life; the session
    /// uses that to enter the terminal phase exactly once.
    pub fn take_life(&mut self) -> bool {
        if self.game_over {
            log::debug!("dropping TakeLife after game over");
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.store.dispatch(StoreEvent::TakeLife);
        if self.lives == 0 {
            self.game_over = true;
            log::info!("lives exhausted at score {}", self.score);
            return true;
        }
        false
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bridge_with_store(lives: u32) -> (StateBridge, Rc<RefCell<MemoryStore>>) {
        let store = Rc::new(RefCell::new(MemoryStore::new(lives)));
        (StateBridge::new(Box::new(store.clone()), lives), store)
    }

    #[test]
    fn test_score_and_lives_mirror_store() {
        let (mut bridge, store) = bridge_with_store(3);
        bridge.add_score(1);
        bridge.add_score(1);
        assert!(!bridge.take_life());

        assert_eq!(bridge.score(), 2);
        assert_eq!(bridge.lives(), 2);
        assert_eq!(store.borrow().score, 2);
        assert_eq!(store.borrow().lives, 2);
    }

    #[test]
    fn test_game_over_triggers_exactly_once() {
        let (mut bridge, _store) = bridge_with_store(2);
        assert!(!bridge.take_life());
        assert!(bridge.take_life());
        assert!(bridge.is_game_over());
        // the latch reports the transition only once
        assert!(!bridge.take_life());
    }

    #[test]
    fn test_dispatches_ignored_after_game_over() {
        let (mut bridge, store) = bridge_with_store(1);
        assert!(bridge.take_life());

        bridge.add_score(5);
        bridge.take_life();

        assert_eq!(bridge.score(), 0);
        assert_eq!(bridge.lives(), 0);
        assert_eq!(store.borrow().score, 0);
        assert_eq!(store.borrow().lives, 0);
    }
}

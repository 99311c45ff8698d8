//! External score/lives state store contract
//!
//! The HUD state container lives outside the simulation and is mutated only
//! through dispatched events, never read back.

use serde::{Deserialize, Serialize};

/// Events the simulation may dispatch against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// Award points for a caught item (amount is always positive)
    AddScore(u32),
    /// Deduct one life for a missed item
    TakeLife,
}

/// Dispatch seam for the external state container
pub trait Store {
    fn dispatch(&mut self, event: StoreEvent);
}

/// In-memory store, the reference implementation for tests and headless runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    pub score: u64,
    pub lives: u32,
}

impl MemoryStore {
    pub fn new(lives: u32) -> Self {
        Self { score: 0, lives }
    }
}

impl Store for MemoryStore {
    fn dispatch(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::AddScore(amount) => self.score += u64::from(amount),
            StoreEvent::TakeLife => self.lives = self.lives.saturating_sub(1),
        }
    }
}

impl<S: Store> Store for std::rc::Rc<std::cell::RefCell<S>> {
    fn dispatch(&mut self, event: StoreEvent) {
        self.borrow_mut().dispatch(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_dispatch() {
        let mut store = MemoryStore::new(3);
        store.dispatch(StoreEvent::AddScore(1));
        store.dispatch(StoreEvent::AddScore(2));
        store.dispatch(StoreEvent::TakeLife);
        assert_eq!(store.score, 3);
        assert_eq!(store.lives, 2);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut store = MemoryStore::new(0);
        store.dispatch(StoreEvent::TakeLife);
        assert_eq!(store.lives, 0);
    }
}

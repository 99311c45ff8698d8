//! Cancellable scheduled tasks
//!
//! The simulation never blocks; anything deferred (spawn pacing, the miss
//! grace window) is a task queued against a future tick. Teardown cancels
//! the whole queue; a canceled task never fires.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Deferred work the simulation can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Create the next falling item and re-arm the spawn timer
    SpawnItem,
    /// End a missed item's grace window: deduct the life, remove the item
    FinishMiss { item: EntityId },
}

/// Cancellation token for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Scheduled {
    id: TaskId,
    due: u64,
    task: Task,
}

/// Tick-based task queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire `delay_ticks` after `now`
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: now + delay_ticks,
            task,
        });
        id
    }

    /// Cancel one task; returns whether it was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Cancel everything (scene teardown)
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return every task due at or before `now`
    ///
    /// Order is stable: by due tick, then by scheduling order, so two tasks
    /// landing on the same tick fire in the order they were queued.
    pub fn drain_due(&mut self, now: u64) -> Vec<Task> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = rest;
        due.sort_by_key(|s| (s.due, s.id));
        due.into_iter().map(|s| s.task).collect()
    }
}

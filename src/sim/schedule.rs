//! Deferred actions
//!
//! A few transitions happen a fixed time after their trigger (reeling in
//! after a stopped cast, bite handoff, clearing the catch display). They are
//! queued here with the session generation that created them; a task from an
//! older generation is dropped instead of touching the new game.

use serde::{Deserialize, Serialize};

/// Something to do later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// End the hold after a stopped cast and start reeling in
    BeginReel,
    /// Turn the pending bite into a timing challenge
    OpenChallenge,
    /// Clear the caught-fish display
    ClearCaught,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub due_tick: u64,
    pub generation: u32,
    pub action: Deferred,
}

/// Deferred tasks ordered by due tick (ties keep insertion order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn schedule(&mut self, due_tick: u64, generation: u32, action: Deferred) {
        let idx = self.tasks.partition_point(|t| t.due_tick <= due_tick);
        self.tasks.insert(
            idx,
            ScheduledTask {
                due_tick,
                generation,
                action,
            },
        );
    }

    /// Pop every task due at or before `now`. Tasks whose generation is not
    /// `generation` are discarded.
    pub fn take_due(&mut self, now: u64, generation: u32) -> Vec<Deferred> {
        let split = self.tasks.partition_point(|t| t.due_tick <= now);
        self.tasks
            .drain(..split)
            .filter_map(|t| {
                if t.generation == generation {
                    Some(t.action)
                } else {
                    log::debug!(
                        "dropping stale {:?} from generation {} (current {})",
                        t.action,
                        t.generation,
                        generation
                    );
                    None
                }
            })
            .collect()
    }

    /// Drop every pending task of one kind
    pub fn cancel(&mut self, action: Deferred) {
        self.tasks.retain(|t| t.action != action);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, action: Deferred) -> bool {
        self.tasks.iter().any(|t| t.action == action)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

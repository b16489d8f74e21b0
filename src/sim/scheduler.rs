//! Cooperative timer queue
//!
//! A single-threaded stand-in for "call me back in N milliseconds". Time
//! only moves when the owner advances it, so the same sequence of
//! `advance_to` calls always fires the same actions in the same order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Deferred work the controller knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerAction {
    /// Run one Running tick
    Tick,
    /// Start a new round after a lost ball
    RestartRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    /// Insertion order breaks ties between equal due times
    seq: u64,
    action: TimerAction,
}

/// Min-queue of pending actions keyed by due time
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire-and-forget: run `action` once, `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, action: TimerAction) {
        let entry = Entry {
            due_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Due time of the earliest pending action
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Pop the earliest action due at or before `deadline_ms`, moving the
    /// clock to its due time.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<TimerAction> {
        let Reverse(entry) = self.queue.peek()?;
        if entry.due_ms > deadline_ms {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.action)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Number of pending actions of the given kind
    pub fn pending(&self, action: TimerAction) -> usize {
        self.queue.iter().filter(|Reverse(e)| e.action == action).count()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

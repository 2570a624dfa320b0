//! One-shot timers on a virtual millisecond clock
//!
//! The host advances the clock; due timers pop in (due time, insertion)
//! order so replays are deterministic.

use std::collections::BTreeMap;

use super::object::EntityId;
use crate::renderer::Fill;

/// Deferred work the session asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Next step of the game loop
    Tick,
    /// Flash frame on a dying brick
    BrickFill { brick: EntityId, fill: Fill },
    /// Flashing is over, drop the brick
    RemoveBrick { brick: EntityId },
    /// Flash frame on a lost ball
    BallFill { ball: EntityId, fill: Fill },
    /// Put a fresh ball on the paddle
    Serve,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    seq: u64,
    pending: BTreeMap<(u64, u64), Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `timer` once, `delay_ms` from now
    pub fn after(&mut self, delay_ms: u64, timer: Timer) {
        let key = (self.now_ms.saturating_add(delay_ms), self.seq);
        self.seq += 1;
        self.pending.insert(key, timer);
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time
    pub fn pop_due(&mut self, until: u64) -> Option<Timer> {
        let entry = self.pending.first_entry()?;
        let (due, _) = *entry.key();
        if due > until {
            return None;
        }
        let timer = entry.remove();
        self.now_ms = self.now_ms.max(due);
        Some(timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }

    /// Drop every pending timer matching `pred`; returns how many went
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&Timer) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, timer| !pred(timer));
        before - self.pending.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().map(|&(due, _)| due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

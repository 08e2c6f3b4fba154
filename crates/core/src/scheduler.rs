// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline bookkeeping for a run's gate timers
//!
//! The scheduler only records absolute deadlines. Whoever sleeps until a
//! deadline must `claim` it before acting, and a cancelled timer can no
//! longer be claimed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use tokio::time::Instant;

/// Identifier of a scheduled timer, unique within one scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    fire_at: Instant,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.id == other.id
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first, ties broken by arming order
        Reverse((self.fire_at, self.id)).cmp(&Reverse((other.fire_at, other.id)))
    }
}

/// Pending deadlines for one run
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    items: BinaryHeap<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-shot deadline
    pub fn schedule(&mut self, fire_at: Instant) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.items.push(Entry { id, fire_at });
        id
    }

    /// Remove a pending deadline. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.items.len();
        self.items.retain(|entry| entry.id != id);
        self.items.len() != before
    }

    /// Take ownership of a deadline that has been reached.
    ///
    /// Returns the deadline if the timer was still pending and is due at
    /// `now`; the timer is then removed.
    pub fn claim(&mut self, id: TimerId, now: Instant) -> Option<Instant> {
        let fire_at = self.deadline(id)?;
        if fire_at > now {
            return None;
        }
        self.items.retain(|entry| entry.id != id);
        Some(fire_at)
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.items
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.fire_at)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadline(id).is_some()
    }

    /// Number of timers neither claimed nor cancelled
    pub fn pending(&self) -> usize {
        self.items.len()
    }
}

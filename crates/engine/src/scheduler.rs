// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer-based scheduling for the periodic tasks and the resume one-shot

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

/// The kind of scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledKind {
    /// Re-initialize the device and track availability
    Probe,
    /// Buffer one record
    Tick,
    /// Enter the maintenance window
    Suspend,
    /// Snapshot the primary log
    Backup,
    /// Leave the maintenance window (one-shot)
    Resume,
}

impl ScheduledKind {
    /// Timer id; each kind has at most one pending timer
    pub fn id(self) -> &'static str {
        match self {
            ScheduledKind::Probe => "probe",
            ScheduledKind::Tick => "tick",
            ScheduledKind::Suspend => "suspend",
            ScheduledKind::Backup => "backup",
            ScheduledKind::Resume => "resume",
        }
    }
}

impl fmt::Display for ScheduledKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A scheduled item
#[derive(Debug, Clone)]
pub struct ScheduledItem {
    pub id: String,
    pub fire_at: Instant,
    pub kind: ScheduledKind,
    pub repeat: Option<Duration>,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
}

impl PartialEq for ScheduledItem {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for ScheduledItem {}

impl PartialOrd for ScheduledItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest first, then first scheduled
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

/// Manages scheduled events
#[derive(Debug, Default)]
pub struct Scheduler {
    items: BinaryHeap<ScheduledItem>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, id: String, fire_at: Instant, kind: ScheduledKind, repeat: Option<Duration>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.push(ScheduledItem {
            id,
            fire_at,
            kind,
            repeat,
            seq,
        });
    }

    /// Schedule a one-shot timer
    #[cfg(test)]
    pub fn schedule(&mut self, id: impl Into<String>, fire_at: Instant, kind: ScheduledKind) {
        self.push(id.into(), fire_at, kind, None);
    }

    /// Schedule a repeating timer
    pub fn schedule_repeating(
        &mut self,
        id: impl Into<String>,
        fire_at: Instant,
        interval: Duration,
        kind: ScheduledKind,
    ) {
        self.push(id.into(), fire_at, kind, Some(interval));
    }

    /// Replace any pending one-shot with the same id
    pub fn rearm(&mut self, id: impl Into<String>, fire_at: Instant, kind: ScheduledKind) {
        let id = id.into();
        self.cancel(&id);
        self.push(id, fire_at, kind, None);
    }

    /// Cancel a scheduled item
    pub fn cancel(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Get all items that should fire at or before the given time
    ///
    /// A repeating item that fell more than one interval behind fires once
    /// and is re-armed one interval after `now`; missed slots are dropped.
    pub fn poll(&mut self, now: Instant) -> Vec<ScheduledItem> {
        let mut ready = Vec::new();
        let mut rearmed = Vec::new();

        while let Some(item) = self.items.peek() {
            if item.fire_at > now {
                break;
            }
            let Some(item) = self.items.pop() else {
                break;
            };

            if let Some(interval) = item.repeat {
                let mut next = item.fire_at + interval;
                if next <= now {
                    next = now + interval;
                }
                rearmed.push((item.id.clone(), next, item.kind, interval));
            }
            ready.push(item);
        }

        // Pushed after draining so a zero interval cannot spin this loop
        for (id, fire_at, kind, interval) in rearmed {
            self.push(id, fire_at, kind, Some(interval));
        }
        ready
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Get the next fire time, if any
    pub fn next_fire_time(&self) -> Option<Instant> {
        self.items.peek().map(|item| item.fire_at)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

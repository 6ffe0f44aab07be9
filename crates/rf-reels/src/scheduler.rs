//! Deadline scheduler on a monotonic tick clock
//!
//! Replaces nested timers: every pending action is a `(deadline, key)` entry,
//! at most one per key. The owner advances the clock each tick and pops due
//! entries in deadline order (ties in scheduling order). Teardown is a single
//! `cancel_all`.

use std::collections::BTreeMap;
use std::time::Duration;

/// Convert milliseconds to a clock duration, clamping bad input to zero
pub fn ms(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f64(value / 1000.0).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: Duration,
    queue: BTreeMap<(Duration, u64), K>,
    next_seq: u64,
}

impl<K: PartialEq> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Current clock
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn now_ms(&self) -> f64 {
        self.now.as_secs_f64() * 1000.0
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt_ms: f64) {
        self.now = self.now.saturating_add(ms(dt_ms));
    }

    /// Schedule `key` at an absolute deadline, replacing any earlier entry
    pub fn schedule_at(&mut self, deadline: Duration, key: K) {
        self.cancel(&key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((deadline, seq), key);
    }

    /// Schedule `key` `delay_ms` from now
    pub fn schedule_in(&mut self, delay_ms: f64, key: K) {
        let deadline = self.now.saturating_add(ms(delay_ms));
        self.schedule_at(deadline, key);
    }

    /// Remove the entry for `key`; true if one existed
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.queue.len();
        self.queue.retain(|_, k| k != key);
        self.queue.len() != before
    }

    /// Drop every pending entry
    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    /// Earliest entry whose deadline has passed
    pub fn pop_due(&mut self) -> Option<(Duration, K)> {
        let (&(deadline, seq), _) = self.queue.first_key_value()?;
        if deadline > self.now {
            return None;
        }
        self.queue.remove(&(deadline, seq)).map(|key| (deadline, key))
    }

    pub fn deadline_of(&self, key: &K) -> Option<Duration> {
        self.queue
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(&(deadline, _), _)| deadline)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<K: PartialEq> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

//! # Time-Ordered Log
//!
//! Sorted mapping from instant to payload, backed by a `BTreeMap`.
//!
//! ## Collisions
//!
//! Keys are `(instant, sequence)`. Under [`CollisionPolicy::Overwrite`] the
//! sequence is always zero, so a second append at the same instant replaces
//! the first. Under [`CollisionPolicy::Retain`] every append takes the next
//! sequence number and both entries survive, ordered by arrival.
//!
//! ## Range Queries
//!
//! `range` seeks to `start` in O(log n) and walks forward, so the cost is
//! linear in the result size rather than in the log size.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CollisionPolicy;

/// Position of an entry in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActivityKey {
    pub at: DateTime<Utc>,
    pub seq: u64,
}

/// Timestamped payload returned by queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry<P> {
    pub at: DateTime<Utc>,
    pub payload: P,
}

/// Append-only, time-ordered log.
#[derive(Debug, Clone)]
pub struct ActivityLog<P> {
    policy: CollisionPolicy,
    entries: BTreeMap<ActivityKey, P>,
    next_seq: u64,
}

impl<P> Default for ActivityLog<P> {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}

impl<P> ActivityLog<P> {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Inserts `payload` at `at`. Returns the payload it replaced, if any.
    pub fn append(&mut self, at: DateTime<Utc>, payload: P) -> Option<P> {
        let seq = match self.policy {
            CollisionPolicy::Overwrite => 0,
            CollisionPolicy::Retain => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        self.entries.insert(ActivityKey { at, seq }, payload)
    }

    /// Entries with `start <= at <= end`, ascending. Empty when `start > end`.
    pub fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = (DateTime<Utc>, &P)> + '_ {
        let bounds = Self::key_bounds(start, end);
        bounds
            .into_iter()
            .flat_map(move |range| self.entries.range(range))
            .map(|(key, payload)| (key.at, payload))
    }

    /// Cloned entries with `start <= at <= end`, ascending.
    pub fn range_query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<LogEntry<P>>
    where
        P: Clone,
    {
        self.range(start, end)
            .map(|(at, payload)| LogEntry {
                at,
                payload: payload.clone(),
            })
            .collect()
    }

    /// Ascending copy of the whole log.
    pub fn snapshot_all(&self) -> Vec<LogEntry<P>>
    where
        P: Clone,
    {
        self.entries
            .iter()
            .map(|(key, payload)| LogEntry {
                at: key.at,
                payload: payload.clone(),
            })
            .collect()
    }

    /// Entry counts per UTC calendar day within `[start, end]`.
    pub fn counts_by_day(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> BTreeMap<NaiveDate, usize> {
        let mut counts = BTreeMap::new();
        for (at, _) in self.range(start, end) {
            *counts.entry(at.date_naive()).or_insert(0) += 1;
        }
        counts
    }

    pub fn first_at(&self) -> Option<DateTime<Utc>> {
        self.entries.keys().next().map(|key| key.at)
    }

    pub fn last_at(&self) -> Option<DateTime<Utc>> {
        self.entries.keys().next_back().map(|key| key.at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn key_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<RangeInclusive<ActivityKey>> {
        // BTreeMap::range panics on reversed bounds.
        (start <= end).then(|| {
            ActivityKey { at: start, seq: 0 }..=ActivityKey {
                at: end,
                seq: u64::MAX,
            }
        })
    }
}

//! Core types for the event store.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An immutable, caller-constructed event.
///
/// The store never mutates an event. It only positions it inside the
/// buffer of its type or drops it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    event_type: String,
    timestamp: i64,
}

impl Event {
    /// Create a new event. Validation happens on insert, not here.
    pub fn new(event_type: impl Into<String>, timestamp: i64) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp,
        }
    }

    /// Application-defined type this event is partitioned under.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Timestamp used for ordering and range queries.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Insertion ordering rule.
    ///
    /// Returns `Less` when `self` is strictly older than `other` and
    /// `Greater` in every other case, equal timestamps included. It never
    /// returns `Equal`, so a binary search over a buffer always lands on a
    /// single insertion point: in front of the first event that is not
    /// older than the one being inserted.
    pub fn order(&self, other: &Event) -> Ordering {
        if self.timestamp < other.timestamp {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({}@{})", self.event_type, self.timestamp)
    }
}

/// Store statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of types with a live partition.
    pub partition_count: usize,
    /// Total events across all partitions.
    pub event_count: usize,
}

//! Sorted per-type event buffer.

use super::search;
use crate::types::Event;
use parking_lot::{Mutex, RawMutex};
use std::ops::Range;
use std::sync::Arc;

/// A partition: one sorted buffer behind its own lock.
pub type Partition = Arc<Mutex<PartitionBuffer>>;

/// Owned guard over a partition, detached from any borrow of the store.
pub type PartitionGuard = parking_lot::lock_api::ArcMutexGuard<RawMutex, PartitionBuffer>;

/// Events of a single type, kept sorted ascending by timestamp.
///
/// Only the holder of the enclosing partition lock may read or write it.
#[derive(Debug, Default)]
pub struct PartitionBuffer {
    events: Vec<Event>,

    /// Set once `remove_all` has detached this partition from the registry.
    retired: bool,
}

impl PartitionBuffer {
    /// Create an empty buffer with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            retired: false,
        }
    }

    /// Wrap a fresh buffer in its partition lock.
    pub fn new_partition(capacity: usize) -> Partition {
        Arc::new(Mutex::new(Self::with_capacity(capacity)))
    }

    /// Insert in sorted position and return the index used.
    ///
    /// Equal timestamps land in front of the events already stored.
    pub fn insert(&mut self, event: Event) -> usize {
        let index = self
            .events
            .binary_search_by(|probe| probe.order(&event))
            .unwrap_or_else(|index| index);
        self.events.insert(index, event);
        index
    }

    /// Remove and return the event at `index`, shifting the tail left.
    pub fn remove(&mut self, index: usize) -> Event {
        self.events.remove(index)
    }

    /// Index window covering `[start, end)`.
    pub fn window(&self, start: i64, end: i64) -> Range<usize> {
        search::range_bounds(&self.events, start, end)
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    #[cfg(test)]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether this partition has been detached by `remove_all`.
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Drop every event and mark the partition as detached.
    pub(crate) fn retire(&mut self) {
        self.retired = true;
        self.events = Vec::new();
    }
}

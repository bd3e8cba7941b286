//! Type-to-partition registry.

use super::buffer::{Partition, PartitionBuffer};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Maps an event type to its partition.
///
/// The map lock only guards creating and detaching entries. It is always
/// released before a partition lock is requested, so it is never held
/// across an insert or an open iterator.
#[derive(Debug)]
pub struct Registry {
    partitions: RwLock<HashMap<String, Partition>>,
    partition_capacity: usize,
}

impl Registry {
    /// Create an empty registry.
    pub fn new(registry_capacity: usize, partition_capacity: usize) -> Self {
        Self {
            partitions: RwLock::new(HashMap::with_capacity(registry_capacity)),
            partition_capacity,
        }
    }

    /// Look up the partition for `event_type`.
    pub fn get(&self, event_type: &str) -> Option<Partition> {
        self.partitions.read().get(event_type).cloned()
    }

    /// Look up the partition for `event_type`, installing an empty one first
    /// if the type has never been seen.
    pub fn get_or_create(&self, event_type: &str) -> Partition {
        if let Some(partition) = self.get(event_type) {
            return partition;
        }

        let mut partitions = self.partitions.write();
        let capacity = self.partition_capacity;
        Arc::clone(
            partitions
                .entry(event_type.to_string())
                .or_insert_with(|| {
                    debug!(event_type, "creating partition");
                    PartitionBuffer::new_partition(capacity)
                }),
        )
    }

    /// Remove `event_type` from the map if it still points at `partition`.
    ///
    /// Returns false when another partition has since been installed under
    /// the same type, which is then left alone.
    pub fn detach(&self, event_type: &str, partition: &Partition) -> bool {
        let mut partitions = self.partitions.write();
        match partitions.get(event_type) {
            Some(current) if Arc::ptr_eq(current, partition) => {
                partitions.remove(event_type);
                debug!(event_type, "partition detached");
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.partitions.read().contains_key(event_type)
    }

    /// All registered types, sorted.
    pub fn types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.partitions.read().keys().cloned().collect();
        types.sort();
        types
    }

    /// Point-in-time copy of every registered partition handle.
    pub fn snapshot(&self) -> Vec<Partition> {
        self.partitions.read().values().cloned().collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.partitions.read().len()
    }
}

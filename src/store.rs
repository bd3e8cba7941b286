//! Main EventStore struct tying the registry, partitions and iterators together.

use crate::error::{Result, StoreError};
use crate::iterator::RangeIterator;
use crate::partitions::{Partition, PartitionGuard, Registry};
use crate::types::{Event, StoreStats};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Initial capacity of every newly created partition buffer.
    pub partition_capacity: usize,

    /// Initial capacity of the type registry (number of types).
    pub registry_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            partition_capacity: 64,
            registry_capacity: 16,
        }
    }
}

/// In-process store of timestamped events, partitioned by type.
///
/// Provides:
/// - Sorted insertion into the partition of the event's type
/// - Half-open time-range queries returning a lock-holding [`RangeIterator`]
/// - Bulk removal of a type
///
/// Operations on different types never contend. Operations on the same type
/// are serialized by that type's lock, which an open iterator holds until it
/// is closed or dropped. Calling `insert`, `query`, `remove_all`, `len` or
/// `stats` for a type while the same thread holds an iterator on it blocks
/// forever.
#[derive(Debug)]
pub struct EventStore {
    config: StoreConfig,
    registry: Registry,
}

impl EventStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store.
    pub fn with_config(config: StoreConfig) -> Self {
        let registry = Registry::new(config.registry_capacity, config.partition_capacity);
        Self { config, registry }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Write Operations ---

    /// Insert an event in timestamp order under its type.
    ///
    /// Fails with [`StoreError::InvalidEvent`] if the type is empty or the
    /// timestamp is not positive; nothing is modified in that case.
    pub fn insert(&self, event: Event) -> Result<()> {
        validate_event(&event)?;

        loop {
            let partition = self.registry.get_or_create(event.event_type());
            let mut buffer = partition.lock();
            if buffer.is_retired() {
                // Lost a race with remove_all; resolve the type again.
                continue;
            }

            let index = buffer.insert(event);
            if let Some(inserted) = buffer.get(index) {
                trace!(
                    event_type = %inserted.event_type(),
                    index,
                    len = buffer.len(),
                    "event inserted"
                );
            }
            return Ok(());
        }
    }

    /// Discard every event of `event_type`. Unknown types are a no-op.
    ///
    /// Waits for any open iterator on the type to close first.
    pub fn remove_all(&self, event_type: &str) {
        let Some(partition) = self.registry.get(event_type) else {
            return;
        };

        let mut buffer = partition.lock();
        if buffer.is_retired() {
            return;
        }

        let dropped = buffer.len();
        buffer.retire();
        self.registry.detach(event_type, &partition);
        debug!(event_type, dropped, "partition removed");
    }

    // --- Read Operations ---

    /// Open an iterator over events of `event_type` with
    /// `start_inclusive <= timestamp < end_exclusive`, in ascending order.
    ///
    /// Blocks until the type's lock is available. An unknown type yields an
    /// empty iterator that holds no lock.
    pub fn query(
        &self,
        event_type: &str,
        start_inclusive: i64,
        end_exclusive: i64,
    ) -> Result<RangeIterator> {
        validate_query(event_type, start_inclusive, end_exclusive)?;

        loop {
            let Some(partition) = self.registry.get(event_type) else {
                return Ok(RangeIterator::empty(event_type));
            };

            let guard = partition.lock_arc();
            if let Some(it) = open_window(guard, event_type, start_inclusive, end_exclusive) {
                return Ok(it);
            }
        }
    }

    /// Like [`query`](Self::query), but gives up with
    /// [`StoreError::LockTimeout`] if the type's lock cannot be acquired
    /// within `timeout`.
    pub fn query_timeout(
        &self,
        event_type: &str,
        start_inclusive: i64,
        end_exclusive: i64,
        timeout: Duration,
    ) -> Result<RangeIterator> {
        validate_query(event_type, start_inclusive, end_exclusive)?;
        let deadline = Instant::now() + timeout;

        loop {
            let Some(partition) = self.registry.get(event_type) else {
                return Ok(RangeIterator::empty(event_type));
            };

            let Some(guard) = partition.try_lock_arc_until(deadline) else {
                warn!(event_type, ?timeout, "timed out waiting for partition lock");
                return Err(StoreError::LockTimeout {
                    event_type: event_type.to_string(),
                    waited: timeout,
                });
            };

            if let Some(it) = open_window(guard, event_type, start_inclusive, end_exclusive) {
                return Ok(it);
            }
        }
    }

    /// Number of events stored under `event_type`.
    pub fn len(&self, event_type: &str) -> usize {
        self.registry
            .get(event_type)
            .map(|partition| live_len(&partition))
            .unwrap_or(0)
    }

    /// Whether `event_type` currently has a partition.
    pub fn contains_type(&self, event_type: &str) -> bool {
        self.registry.contains(event_type)
    }

    /// All types with a partition, sorted.
    pub fn types(&self) -> Vec<String> {
        self.registry.types()
    }

    /// Store statistics. Locks each partition in turn.
    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats::default();
        for partition in self.registry.snapshot() {
            let buffer = partition.lock();
            if !buffer.is_retired() {
                stats.partition_count += 1;
                stats.event_count += buffer.len();
            }
        }
        stats
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an iterator from a freshly locked partition, or `None` if the
/// partition was retired while we waited for it.
fn open_window(
    guard: PartitionGuard,
    event_type: &str,
    start_inclusive: i64,
    end_exclusive: i64,
) -> Option<RangeIterator> {
    if guard.is_retired() {
        return None;
    }
    let window = guard.window(start_inclusive, end_exclusive);
    Some(RangeIterator::new(guard, event_type, window))
}

fn live_len(partition: &Partition) -> usize {
    let buffer = partition.lock();
    if buffer.is_retired() {
        0
    } else {
        buffer.len()
    }
}

fn validate_event(event: &Event) -> Result<()> {
    if event.event_type().is_empty() {
        return Err(StoreError::InvalidEvent("event type is empty".into()));
    }
    if event.timestamp() <= 0 {
        return Err(StoreError::InvalidEvent(format!(
            "timestamp must be positive, got {}",
            event.timestamp()
        )));
    }
    Ok(())
}

fn validate_query(event_type: &str, start_inclusive: i64, end_exclusive: i64) -> Result<()> {
    if event_type.is_empty() {
        return Err(StoreError::InvalidQuery("event type is empty".into()));
    }
    if start_inclusive < 0 {
        return Err(StoreError::InvalidQuery(format!(
            "start must not be negative, got {}",
            start_inclusive
        )));
    }
    if end_exclusive <= 0 {
        return Err(StoreError::InvalidQuery(format!(
            "end must be positive, got {}",
            end_exclusive
        )));
    }
    Ok(())
}

//! # Event Store
//!
//! An embeddable, in-process store for timestamped, typed events, built for
//! fast recent-window lookups over append-heavy time series.
//!
//! ## Core Concepts
//!
//! - **Events**: Immutable `(type, timestamp)` values supplied by the caller
//! - **Partitions**: One sorted buffer and one lock per event type
//! - **Range iterators**: Cursors over `[start, end)` that hold the
//!   partition lock until closed and can delete events in place
//!
//! ## Example
//!
//! ```ignore
//! use tailstore::{Event, EventStore};
//!
//! let store = EventStore::new();
//! store.insert(Event::new("cpu", 1))?;
//! store.insert(Event::new("cpu", 2))?;
//!
//! // Drain everything older than 2.
//! let mut it = store.query("cpu", 0, 2)?;
//! while it.move_next() {
//!     it.remove()?;
//! }
//! it.close();
//! ```
//!
//! Partitions and the registry are internal; only the store and its
//! iterators are reachable from outside the crate:
//!
//! ```compile_fail
//! use tailstore::partitions::Registry;
//! ```

pub mod error;
pub mod iterator;
pub(crate) mod partitions;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use iterator::{IteratorState, RangeIterator};
pub use store::{EventStore, StoreConfig};
pub use types::*;

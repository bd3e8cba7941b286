//! Per-type partitions.
//!
//! Each event type owns a sorted buffer guarded by its own lock. A registry
//! maps type names to partitions and creates them lazily on first insert.

mod buffer;
mod registry;
pub mod search;

pub use buffer::{Partition, PartitionBuffer, PartitionGuard};
pub use registry::Registry;

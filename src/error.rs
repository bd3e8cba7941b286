//! Error types for the event store.

use crate::iterator::IteratorState;
use std::time::Duration;
use thiserror::Error;

/// Main error type for store operations.
///
/// Every variant is a precondition failure detected before any partition
/// is touched, so a failed call never leaves a buffer half-modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid iterator state: {0:?}")]
    InvalidIteratorState(IteratorState),

    #[error("Timed out after {waited:?} waiting for partition '{event_type}'")]
    LockTimeout { event_type: String, waited: Duration },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

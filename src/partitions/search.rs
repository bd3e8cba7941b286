//! Range-boundary search over a sorted partition buffer.

use crate::types::Event;
use std::ops::Range;

/// Index of the first event whose timestamp is `>= timestamp`.
///
/// Compares timestamps directly. The insertion ordering rule never reports
/// equality and cannot be used to locate a boundary.
pub fn lower_bound(events: &[Event], timestamp: i64) -> usize {
    events.partition_point(|event| event.timestamp() < timestamp)
}

/// Index window covering the half-open interval `[start, end)`.
///
/// `lo` is the first index with `timestamp >= start` and `hi` the first with
/// `timestamp >= end`. An inverted interval collapses to the empty window
/// at `lo`, which is also where an event at `start` would be inserted.
pub fn range_bounds(events: &[Event], start: i64, end: i64) -> Range<usize> {
    let lo = lower_bound(events, start);
    let hi = lower_bound(events, end).max(lo);
    lo..hi
}

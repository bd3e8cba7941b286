//! Lock-holding range iterator over a single partition.
//!
//! A `RangeIterator` owns its partition lock from the moment `query` returns
//! until `close` is called or the iterator is dropped. While it is open no
//! other insert, query or `remove_all` on that type can proceed, so the
//! window it walks is exactly the buffer as it was at acquisition, minus the
//! events the iterator removes itself.
//!
//! ```ignore
//! let mut it = store.query("cpu", 0, 100)?;
//! while it.move_next() {
//!     if it.current()?.timestamp() < cutoff {
//!         it.remove()?;
//!     }
//! }
//! it.close();
//! ```

use crate::error::{Result, StoreError};
use crate::partitions::PartitionGuard;
use crate::types::Event;
use std::fmt;
use std::ops::Range;
use tracing::trace;

/// Observable state of a [`RangeIterator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IteratorState {
    /// Created, `move_next` not called yet.
    NotStarted,
    /// Cursor is on an event; `current` and `remove` are valid.
    Positioned,
    /// Walked past the end of the window.
    Exhausted,
    /// Lock released. Terminal.
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    BeforeStart,
    At(usize),
}

/// Forward-only cursor over `[start, end)` of one partition's buffer.
pub struct RangeIterator {
    guard: Option<PartitionGuard>,
    event_type: String,
    start: usize,
    /// Exclusive; shrinks by one on every `remove`.
    end: usize,
    cursor: Cursor,
    closed: bool,
}

impl RangeIterator {
    /// Iterator over `window` of an already locked partition.
    pub(crate) fn new(guard: PartitionGuard, event_type: &str, window: Range<usize>) -> Self {
        let end = window.end.min(guard.len());
        let start = window.start.min(end);
        trace!(event_type, start, end, "range iterator opened");
        Self {
            guard: Some(guard),
            event_type: event_type.to_string(),
            start,
            end,
            cursor: Cursor::BeforeStart,
            closed: false,
        }
    }

    /// Iterator over a type that has no partition. Holds no lock.
    pub(crate) fn empty(event_type: &str) -> Self {
        Self {
            guard: None,
            event_type: event_type.to_string(),
            start: 0,
            end: 0,
            cursor: Cursor::BeforeStart,
            closed: false,
        }
    }

    /// Type this iterator was opened on.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn state(&self) -> IteratorState {
        if self.closed {
            return IteratorState::Closed;
        }
        match self.cursor {
            Cursor::BeforeStart => IteratorState::NotStarted,
            Cursor::At(index) if index < self.end => IteratorState::Positioned,
            Cursor::At(_) => IteratorState::Exhausted,
        }
    }

    /// Events in the window not yet visited.
    pub fn remaining(&self) -> usize {
        if self.closed {
            return 0;
        }
        match self.cursor {
            Cursor::BeforeStart => self.end - self.start,
            Cursor::At(index) => self.end.saturating_sub(index + 1),
        }
    }

    /// Advance to the next event. Returns false once the window is exhausted
    /// and always after `close`.
    pub fn move_next(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let next = match self.cursor {
            Cursor::BeforeStart => self.start,
            Cursor::At(index) => (index + 1).min(self.end),
        };
        self.cursor = Cursor::At(next);
        next < self.end
    }

    /// The event under the cursor.
    pub fn current(&self) -> Result<&Event> {
        let index = self.positioned_index()?;
        self.guard
            .as_ref()
            .and_then(|guard| guard.get(index))
            .ok_or(StoreError::InvalidIteratorState(self.state()))
    }

    /// Delete the event under the cursor from the partition and return it.
    ///
    /// The cursor and the end bound both step back by one, so the next
    /// `move_next` lands on the event that shifted into the vacated slot.
    pub fn remove(&mut self) -> Result<Event> {
        let index = self.positioned_index()?;
        let guard = self
            .guard
            .as_mut()
            .ok_or(StoreError::InvalidIteratorState(IteratorState::Closed))?;

        let removed = guard.remove(index);
        self.end -= 1;
        self.cursor = if index > self.start {
            Cursor::At(index - 1)
        } else {
            Cursor::BeforeStart
        };
        trace!(event_type = %self.event_type, index, "event removed");
        Ok(removed)
    }

    /// Release the partition lock. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.guard.take().is_some() {
            trace!(event_type = %self.event_type, "range iterator closed");
        }
    }

    fn positioned_index(&self) -> Result<usize> {
        match (self.state(), self.cursor) {
            (IteratorState::Positioned, Cursor::At(index)) => Ok(index),
            (state, _) => Err(StoreError::InvalidIteratorState(state)),
        }
    }
}

impl Iterator for RangeIterator {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.move_next() {
            self.current().ok().cloned()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl Drop for RangeIterator {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for RangeIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIterator")
            .field("event_type", &self.event_type)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("state", &self.state())
            .finish()
    }
}

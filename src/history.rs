//! Undo/redo history of whole-sequence snapshots.
//!
//! Entries are kept most-recent first. The cursor counts how many steps
//! the user has undone; recording after an undo discards everything ahead
//! of the cursor (branching history is not supported).

use crate::array::Value;
use std::collections::VecDeque;

/// Bounded linear undo/redo log.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    /// Snapshots, front = most recent.
    entries: VecDeque<Vec<Value>>,
    /// Offset of the current entry from the front.
    cursor: usize,
    /// Oldest entries are evicted beyond this many.
    capacity: usize,
}

impl HistoryRing {
    /// Create an empty history holding at most `capacity` snapshots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            cursor: 0,
            capacity,
        }
    }

    /// Record the state after a user-visible change.
    pub fn record(&mut self, snapshot: Vec<Value>) {
        if self.cursor > 0 {
            self.entries.drain(..self.cursor);
            self.cursor = 0;
        }
        self.entries.push_front(snapshot);
        self.entries.truncate(self.capacity);
    }

    /// Step back to the previous snapshot, if there is one.
    pub fn undo(&mut self) -> Option<Vec<Value>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> Option<Vec<Value>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&[Value]> {
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    /// Whether an older snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Whether a newer snapshot exists.
    pub const fn can_redo(&self) -> bool {
        self.cursor > 0
    }

    /// Steps undone so far.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Snapshots from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &[Value]> {
        self.entries.iter().map(Vec::as_slice)
    }
}

//! Bounded FIFO of identity references to freshly inserted records.

use std::fmt;

use crate::types::{DEFAULT_ARRIVAL_CAPACITY, RecordRef};

/// Returned by [`ArrivalQueue::enqueue`] when the queue has no free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

impl<T> QueueFull<T> {
    /// Returns the value that was dropped.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arrival queue is full")
    }
}

impl<T: fmt::Debug> std::error::Error for QueueFull<T> {}

/// Fixed-capacity circular buffer. Overflow drops the newest entry.
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    slots: Box<[Option<RecordRef>]>,
    head: usize,
    len: usize,
}

impl Default for ArrivalQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ARRIVAL_CAPACITY)
    }
}

impl ArrivalQueue {
    /// Creates a queue with the default capacity of 100.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue holding at most `capacity` references (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Appends `r` at the tail, or hands it back when full.
    pub fn enqueue(&mut self, r: RecordRef) -> Result<(), QueueFull<RecordRef>> {
        if self.is_full() {
            return Err(QueueFull(r));
        }
        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = Some(r);
        self.len += 1;
        Ok(())
    }

    /// Removes the oldest reference.
    pub fn dequeue(&mut self) -> Option<RecordRef> {
        if self.len == 0 {
            return None;
        }
        let r = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        r
    }

    /// Oldest reference without removing it.
    pub fn peek(&self) -> Option<RecordRef> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head]
    }

    /// Pending references, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = RecordRef> + '_ {
        (0..self.len).filter_map(move |i| self.slots[(self.head + i) % self.slots.len()])
    }

    /// Number of pending references.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the next enqueue would be dropped.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Maximum number of pending references.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

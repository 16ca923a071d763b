use rust_decimal::Decimal;

use crate::Value;

/// Fixed-capacity FIFO of the trailing window.
///
/// `push` hands back the evicted value once the buffer is full; `iter`
/// walks the held values from oldest to newest.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer {
    buffer: Vec<Value>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![Decimal::ZERO; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Number of values currently held (at most `capacity`).
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Held values in insertion order, oldest first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Value> {
        self.buffer[self.head..self.len]
            .iter()
            .chain(&self.buffer[..self.head])
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Value) -> Option<Value> {
        if self.is_full() {
            let old = self.buffer[self.head];

            self.buffer[self.head] = value;

            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer[self.len] = value;
            self.len += 1;

            None
        }
    }
}

//! Record type
//!
//! A record is the unit stored in a queue. Its offset and payload are fixed
//! at append time; the only mutable part is the commit flag, which moves from
//! `false` to `true` exactly once and never back.

use crate::types::{Offset, Payload};

/// One entry of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    offset: Offset,
    payload: Payload,
    committed: bool,
}

impl Record {
    /// Create an uncommitted record.
    pub fn new(offset: Offset, payload: Payload) -> Self {
        Self {
            offset,
            payload,
            committed: false,
        }
    }

    /// Offset assigned at append time
    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Caller-supplied payload
    #[inline]
    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Whether a consumer has committed this record
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Mark the record committed.
    ///
    /// Returns `true` if the flag flipped, `false` if it was already set.
    pub fn commit(&mut self) -> bool {
        let flipped = !self.committed;
        self.committed = true;
        flipped
    }

    /// `(offset, payload)` pair, the shape polls return
    #[inline]
    pub fn as_pair(&self) -> (Offset, Payload) {
        (self.offset, self.payload)
    }
}

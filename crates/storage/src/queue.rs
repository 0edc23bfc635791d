//! Per-key record queue
//!
//! A [`Queue`] is the append-only record sequence for one key together with
//! its commit watermark. Both live behind a single `parking_lot::Mutex`
//! embedded in the queue, so:
//!
//! - appends to the same key are totally ordered
//! - polls and commits see a consistent view of the records
//! - different queues never share a lock
//!
//! # Invariants
//!
//! - `records[i].offset() == i + 1` (dense, 1-based)
//! - committed records form a prefix of `records`, and `watermark` is the
//!   length of that prefix
//! - `watermark` never decreases and never exceeds `records.len()`

use parking_lot::Mutex;

use offsetlog_core::{Offset, Payload, Record, FIRST_OFFSET};

/// State guarded by the queue lock
#[derive(Debug, Default)]
struct QueueState {
    records: Vec<Record>,
    /// Highest committed offset; `NO_OFFSET` when nothing is committed
    watermark: Offset,
}

impl QueueState {
    fn next_offset(&self) -> Offset {
        match self.records.last() {
            Some(last) => last.offset() + 1,
            None => FIRST_OFFSET,
        }
    }

    /// Index of the first record with `offset >= from`
    fn start_index(&self, from: Offset) -> usize {
        if from <= FIRST_OFFSET {
            return 0;
        }
        usize::try_from(from - FIRST_OFFSET)
            .unwrap_or(usize::MAX)
            .min(self.records.len())
    }
}

/// One key's append-only record sequence
///
/// # Thread Safety
///
/// All methods take `&self`; the internal lock is acquired for the duration
/// of a single call and released on every exit path by its guard.
#[derive(Debug)]
pub struct Queue {
    key: String,
    state: Mutex<QueueState>,
}

impl Queue {
    /// Create an empty queue for `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: Mutex::new(QueueState::default()),
        }
    }

    /// The key this queue belongs to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a record and return its offset.
    ///
    /// The offset is one past the last record's offset, or
    /// [`FIRST_OFFSET`] for an empty queue.
    pub fn append(&self, payload: Payload) -> Offset {
        let mut state = self.state.lock();
        let offset = state.next_offset();
        state.records.push(Record::new(offset, payload));
        offset
    }

    /// All `(offset, payload)` pairs with `offset >= from`, ascending.
    ///
    /// Returns an empty vector when `from` is past the end.
    ///
    /// # Performance
    ///
    /// O(k) in the number of records returned: offsets are dense, so the
    /// first matching record is found by index instead of by scan.
    pub fn read_from(&self, from: Offset) -> Vec<(Offset, Payload)> {
        let state = self.state.lock();
        let start = state.start_index(from);
        state.records[start..].iter().map(Record::as_pair).collect()
    }

    /// Commit every record with `offset <= upto`.
    ///
    /// Offsets past the end clamp to the last record. Committing at or below
    /// the current watermark changes nothing. Returns the watermark after
    /// the call.
    pub fn commit_upto(&self, upto: Offset) -> Offset {
        let mut state = self.state.lock();
        let len = state.records.len() as Offset;
        let target = upto.min(len);
        if target <= state.watermark {
            return state.watermark;
        }

        let from = state.watermark as usize;
        for record in &mut state.records[from..target as usize] {
            record.commit();
        }
        state.watermark = target;
        target
    }

    /// Highest committed offset, or [`NO_OFFSET`](offsetlog_core::NO_OFFSET)
    /// when nothing is committed
    pub fn last_committed(&self) -> Offset {
        self.state.lock().watermark
    }

    /// Number of records in the queue
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    /// Check if the queue holds no records
    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// Offset of the last record, or `NO_OFFSET` when empty
    #[cfg(test)]
    pub fn last_offset(&self) -> Offset {
        self.state
            .lock()
            .records
            .last()
            .map_or(offsetlog_core::NO_OFFSET, Record::offset)
    }

    /// Copy of every record, commit flags included
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Record> {
        self.state.lock().records.clone()
    }
}

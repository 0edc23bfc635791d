//! Log engine façade
//!
//! [`LogEngine`] is the only entry point that mutates the log. It composes
//! the queue registry and per-queue operations into the four operations the
//! protocol exposes:
//!
//! | Operation | Creates queue | Fails on unknown key |
//! |-----------|---------------|----------------------|
//! | [`append`](LogEngine::append) | yes | never |
//! | [`poll`](LogEngine::poll) | no | `QueueNotFound` |
//! | [`commit_offsets`](LogEngine::commit_offsets) | no | `QueueNotFound` |
//! | [`last_committed_offset`](LogEngine::last_committed_offset) | no | `QueueNotFound` |
//!
//! ## Batches
//!
//! Each operation except append has a batch form taking many keys. Batches
//! are all-or-nothing: if any key is unknown the batch fails and no key is
//! touched. For commit this is enforced by resolving every queue before
//! committing any of them; queues are never removed, so a resolved queue
//! cannot disappear in between.
//!
//! ## Offsets from callers
//!
//! Offsets arrive as signed integers. A negative poll offset reads from the
//! start; a negative commit offset commits nothing.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use offsetlog_core::{clamp_offset, LogError, Offset, Payload, Result};
use offsetlog_storage::{Queue, QueueRegistry};

use crate::config::EngineConfig;

/// Records returned by a poll, as `(offset, payload)` pairs in offset order
pub type PolledRecords = Vec<(Offset, Payload)>;

/// Point-in-time counters across every queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Number of queues
    pub queues: usize,
    /// Records across all queues
    pub records: usize,
    /// Committed records across all queues
    pub committed: u64,
}

/// In-memory, per-key append-only log
///
/// # Thread Safety
///
/// `LogEngine` is `Send + Sync`; share it behind an `Arc`. Operations on
/// the same key serialize on that key's queue lock. Operations on different
/// keys only meet in the registry, and only while a new key is created.
///
/// # Example
///
/// ```
/// use offsetlog_engine::LogEngine;
///
/// let engine = LogEngine::new();
/// assert_eq!(engine.append("k1", 10), 1);
/// assert_eq!(engine.append("k1", 20), 2);
///
/// assert_eq!(engine.poll("k1", 2).unwrap(), vec![(2, 20)]);
///
/// engine.commit_offsets("k1", 1).unwrap();
/// assert_eq!(engine.last_committed_offset("k1").unwrap(), 1);
/// ```
pub struct LogEngine {
    registry: QueueRegistry,
}

impl LogEngine {
    /// Create an engine with default sizing
    pub fn new() -> Self {
        Self {
            registry: QueueRegistry::new(),
        }
    }

    /// Create an engine sized by `config`
    ///
    /// Fails with `InvalidArgument` if the config does not validate.
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let registry = match config.shard_amount {
            Some(shards) => QueueRegistry::with_capacity_and_shards(config.initial_capacity, shards),
            None => QueueRegistry::with_capacity(config.initial_capacity),
        };
        Ok(Self { registry })
    }

    fn queue(&self, key: &str) -> Result<Arc<Queue>> {
        self.registry
            .get(key)
            .ok_or_else(|| LogError::queue_not_found(key))
    }

    // ========================================================================
    // Single-key operations
    // ========================================================================

    /// Append `payload` to `key`'s queue, creating the queue on first use.
    ///
    /// Returns the offset assigned to the new record.
    pub fn append(&self, key: &str, payload: Payload) -> Offset {
        let offset = self.registry.get_or_create(key).append(payload);
        trace!(key, offset, "appended record");
        offset
    }

    /// Records of `key` with `offset >= from`, in offset order.
    ///
    /// Committed and uncommitted records are both returned. An offset past
    /// the end yields an empty vector.
    pub fn poll(&self, key: &str, from: i64) -> Result<PolledRecords> {
        let queue = self.queue(key)?;
        Ok(queue.read_from(clamp_offset(from)))
    }

    /// Commit every record of `key` with `offset <= upto`.
    ///
    /// Never lowers the commit watermark: a smaller offset than an earlier
    /// commit changes nothing.
    pub fn commit_offsets(&self, key: &str, upto: i64) -> Result<()> {
        let queue = self.queue(key)?;
        let watermark = queue.commit_upto(clamp_offset(upto));
        trace!(key, upto, watermark, "committed offsets");
        Ok(())
    }

    /// Highest committed offset of `key`, or 0 if nothing is committed
    pub fn last_committed_offset(&self, key: &str) -> Result<Offset> {
        Ok(self.queue(key)?.last_committed())
    }

    // ========================================================================
    // Batch operations (all-or-nothing)
    // ========================================================================

    /// Poll several keys, each from its own offset.
    ///
    /// Each key is read independently under its own lock. Fails on the first
    /// unknown key; no partial result is returned.
    pub fn poll_batch<I, K>(&self, offsets: I) -> Result<BTreeMap<String, PolledRecords>>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut msgs = BTreeMap::new();
        for (key, from) in offsets {
            let key = key.as_ref();
            let records = self.poll(key, from).map_err(|e| {
                debug!(key, op = "poll", "rejecting batch");
                e
            })?;
            msgs.insert(key.to_owned(), records);
        }
        Ok(msgs)
    }

    /// Commit several keys, each up to its own offset.
    ///
    /// Every key is resolved before anything is committed, so an unknown
    /// key leaves all watermarks untouched.
    pub fn commit_batch<I, K>(&self, offsets: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let resolved = offsets
            .into_iter()
            .map(|(key, upto)| {
                let key = key.as_ref();
                self.queue(key).map(|queue| (queue, upto)).map_err(|e| {
                    debug!(key, op = "commit_offsets", "rejecting batch");
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for (queue, upto) in resolved {
            let watermark = queue.commit_upto(clamp_offset(upto));
            trace!(key = queue.key(), upto, watermark, "committed offsets");
        }
        Ok(())
    }

    /// Commit watermark of each key in `keys`.
    ///
    /// Fails on the first unknown key.
    pub fn list_committed_offsets<I, K>(&self, keys: I) -> Result<BTreeMap<String, Offset>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut offsets = BTreeMap::new();
        for key in keys {
            let key = key.as_ref();
            let offset = self.last_committed_offset(key).map_err(|e| {
                debug!(key, op = "list_committed_offsets", "rejecting batch");
                e
            })?;
            offsets.insert(key.to_owned(), offset);
        }
        Ok(offsets)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of records in `key`'s queue
    pub fn len(&self, key: &str) -> Result<usize> {
        Ok(self.queue(key)?.len())
    }

    /// Check if `key` has a queue
    pub fn contains(&self, key: &str) -> bool {
        self.registry.contains(key)
    }

    /// Every key that has been appended to, sorted
    pub fn keys(&self) -> Vec<String> {
        self.registry.keys()
    }

    /// Counters across every queue
    ///
    /// Each queue is read under its own lock in turn, so the totals are not
    /// an atomic snapshot while writers are active.
    pub fn stats(&self) -> EngineStats {
        self.registry
            .queues()
            .iter()
            .fold(EngineStats::default(), |mut stats, queue| {
                stats.queues += 1;
                stats.records += queue.len();
                stats.committed += queue.last_committed();
                stats
            })
    }
}

impl Default for LogEngine {
    fn default() -> Self {
        Self::new()
    }
}

//! Key to queue registry
//!
//! Maps each key to its [`Queue`] using a sharded DashMap keyed by string
//! with FxHash.
//!
//! # Design
//!
//! - DashMap: sharded, lookups only lock the target shard for reading
//! - Get-or-create: a single `entry()` call covers lookup and insert, so two
//!   first writers to the same key always end up with the same queue
//! - Queues are handed out as `Arc<Queue>`: the shard guard is released
//!   before any record-level work, so different keys never contend on the
//!   registry once their queues exist
//!
//! Queues are never removed.

use std::hash::BuildHasherDefault;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHasher;
use tracing::debug;

use crate::queue::Queue;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Registry of every queue in the log
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - get(): shared lock on one shard, released before returning
/// - get_or_create(): exclusive lock on one shard only when the key is new
/// - Different keys in different shards never contend
pub struct QueueRegistry {
    queues: DashMap<String, Arc<Queue>, FxBuildHasher>,
}

impl QueueRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            queues: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Create with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queues: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
        }
    }

    /// Create with room for `capacity` keys spread over `shard_amount` shards
    ///
    /// # Panics
    ///
    /// DashMap panics unless `shard_amount` is a power of two greater than
    /// one. Callers validate this first (see `EngineConfig::validate`).
    pub fn with_capacity_and_shards(capacity: usize, shard_amount: usize) -> Self {
        Self {
            queues: DashMap::with_capacity_and_hasher_and_shard_amount(
                capacity,
                FxBuildHasher::default(),
                shard_amount,
            ),
        }
    }

    /// Get the queue for `key`, creating an empty one if absent.
    ///
    /// Lookup and insert happen under one shard lock. Exactly one queue ever
    /// exists per key regardless of how many callers race here.
    pub fn get_or_create(&self, key: &str) -> Arc<Queue> {
        // Fast path: existing keys only need the shard read lock
        if let Some(queue) = self.queues.get(key) {
            return Arc::clone(queue.value());
        }

        let entry = self.queues.entry(key.to_owned()).or_insert_with(|| {
            debug!(key, "creating queue");
            Arc::new(Queue::new(key))
        });
        Arc::clone(entry.value())
    }

    /// Get the queue for `key` without creating it
    pub fn get(&self, key: &str) -> Option<Arc<Queue>> {
        self.queues.get(key).map(|queue| Arc::clone(queue.value()))
    }

    /// Check if a queue exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.queues.contains_key(key)
    }

    /// Number of queues
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    /// Check if no queue has been created yet
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// All known keys, sorted
    ///
    /// NOTE: collect + sort over every shard. Not for the request path.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.queues.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        keys
    }

    /// Handles to every queue, sorted by key
    pub fn queues(&self) -> Vec<Arc<Queue>> {
        let mut queues: Vec<Arc<Queue>> =
            self.queues.iter().map(|e| Arc::clone(e.value())).collect();
        queues.sort_unstable_by(|a, b| a.key().cmp(b.key()));
        queues
    }
}

impl Default for QueueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

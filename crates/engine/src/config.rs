//! Engine configuration
//!
//! Sizing knobs for the queue registry. None of them change observable
//! behaviour; they only trade memory for fewer rehashes and less shard
//! contention.

use serde::{Deserialize, Serialize};

use offsetlog_core::{LogError, Result};

// ============================================================================
// Engine Config
// ============================================================================

/// Sizing options for a [`LogEngine`](crate::LogEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of keys the registry pre-allocates room for
    pub initial_capacity: usize,
    /// Number of registry shards; `None` uses DashMap's default
    ///
    /// Must be a power of two greater than one.
    pub shard_amount: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            initial_capacity: 64,
            shard_amount: None,
        }
    }
}

impl EngineConfig {
    /// A handful of keys, few shards (tests, single-consumer workloads)
    pub fn small() -> Self {
        EngineConfig {
            initial_capacity: 16,
            shard_amount: Some(4),
        }
    }

    /// Many keys written from many tasks
    pub fn large() -> Self {
        EngineConfig {
            initial_capacity: 4096,
            shard_amount: Some(128),
        }
    }

    /// Check the options before they reach DashMap, which panics on a bad
    /// shard amount.
    pub fn validate(&self) -> Result<()> {
        if let Some(shards) = self.shard_amount {
            if shards < 2 || !shards.is_power_of_two() {
                return Err(LogError::invalid_argument(format!(
                    "shard_amount must be a power of two greater than 1, got {}",
                    shards
                )));
            }
        }
        Ok(())
    }
}

//! # offsetlog
//!
//! In-memory, per-key append-only log with consumer commit tracking.
//!
//! Every key owns an independent queue of integer records. Appends assign
//! dense offsets starting at 1, polls read from any offset onward, and
//! consumers commit how far they have processed.
//!
//! ## Quick Start
//!
//! ```
//! use offsetlog::prelude::*;
//!
//! let log = LogEngine::new();
//!
//! assert_eq!(log.append("orders", 10), 1);
//! assert_eq!(log.append("orders", 20), 2);
//!
//! assert_eq!(log.poll("orders", 2)?, vec![(2, 20)]);
//!
//! log.commit_offsets("orders", 1)?;
//! assert_eq!(log.last_committed_offset("orders")?, 1);
//! # Ok::<(), offsetlog::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`Record`], [`LogError`]: core types (`offsetlog-core`)
//! - [`Queue`], [`QueueRegistry`]: in-memory storage (`offsetlog-storage`)
//! - [`LogEngine`]: the operations clients call (`offsetlog-engine`)
//! - [`wire`]: line-delimited JSON protocol (`offsetlog-wire`)
//!
//! The `offsetlog-node` binary serves the protocol on stdin/stdout.

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

pub use offsetlog_core::{LogError, Offset, Payload, Record};
pub use offsetlog_engine::{EngineConfig, EngineStats, LogEngine, PolledRecords};
pub use offsetlog_storage::{Queue, QueueRegistry};

/// Wire protocol types
pub use offsetlog_wire as wire;

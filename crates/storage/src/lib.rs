//! Storage layer for offsetlog
//!
//! This crate holds the in-memory state of the log:
//! - [`Queue`]: one key's append-only record sequence and commit watermark,
//!   guarded by its own lock
//! - [`QueueRegistry`]: sharded key to queue map with atomic get-or-create
//!
//! Nothing here is persisted; queues live for the lifetime of the process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod queue;
pub mod registry;

pub use queue::Queue;
pub use registry::QueueRegistry;

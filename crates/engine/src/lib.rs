//! Engine layer for offsetlog
//!
//! [`LogEngine`] ties the storage layer together into the operations clients
//! call: append, poll, commit and watermark lookup, plus their batch forms.
//! [`EngineConfig`] sizes the underlying registry.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::{EngineStats, LogEngine, PolledRecords};

//! Log Engine Integration Tests
//!
//! End-to-end behaviour of the public `offsetlog` API.
//!
//! ## Modules
//!
//! - `scenarios`: append / poll / commit walkthroughs
//! - `batches`: multi-key poll, commit and list semantics
//! - `concurrency`: multi-threaded appends and commits
//! - `properties`: randomized invariants (proptest)
//! - `errors`: conversion into the unified error type

mod common;

mod batches;
mod errors;
mod properties;
mod scenarios;

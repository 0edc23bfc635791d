//! Core types for offsetlog
//!
//! This crate defines the vocabulary shared by every layer of the log:
//! - [`Record`]: one entry in a queue, its offset, payload and commit flag
//! - [`Offset`] / [`Payload`]: the integer types the log speaks in
//! - [`LogError`]: the error type every engine operation returns

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod types;

pub use error::{LogError, Result};
pub use record::Record;
pub use types::{clamp_offset, Offset, Payload, FIRST_OFFSET, NO_OFFSET};

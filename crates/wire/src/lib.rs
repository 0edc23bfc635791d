//! Wire protocol for offsetlog
//!
//! Clients talk to a node with line-delimited JSON messages. This crate owns
//! the shape of those messages and the codec around them:
//!
//! - [`Message`] / [`Body`] / [`Operation`]: envelope and typed bodies
//! - [`Envelope`]: addressing-only view used to reply to undecodable bodies
//! - [`ErrorCode`]: numeric codes carried by `error` replies
//! - [`decode_line`] / [`encode_line`] and async [`read_line`] /
//!   [`write_message`] helpers
//!
//! ## Operations
//!
//! | Request | Reply | Reply fields |
//! |---------|-------|--------------|
//! | `init` | `init_ok` | none |
//! | `send` (alias `append`) | `send_ok` | `offset` |
//! | `poll` | `poll_ok` | `msgs` |
//! | `commit_offsets` | `commit_offsets_ok` | none |
//! | `list_committed_offsets` | `list_committed_offsets_ok` | `offsets` |
//!
//! ## Examples
//!
//! ```
//! use offsetlog_wire::{decode_line, Operation};
//!
//! let line = r#"{"src":"c1","dest":"n1","body":{"type":"send","msg_id":1,"key":"k1","msg":10}}"#;
//! let msg = decode_line(line).unwrap();
//! assert_eq!(msg.body.op, Operation::Send { key: "k1".into(), msg: 10 });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod message;

pub use codec::{decode_envelope, decode_line, encode_line, read_line, write_message};
pub use error::{ErrorCode, WireError};
pub use message::{Body, Envelope, EnvelopeBody, Message, Operation, REQUEST_TYPES};

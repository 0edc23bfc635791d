//! Message envelope and operation bodies
//!
//! Every message is a JSON object with a source, a destination and a body:
//!
//! ```json
//! {"src": "c1", "dest": "n1", "body": {"type": "send", "msg_id": 1, "key": "k1", "msg": 10}}
//! ```
//!
//! The body's `type` field selects an [`Operation`]; `msg_id` and
//! `in_reply_to` sit beside the operation's own fields.
//!
//! Maps in replies are `BTreeMap`s so encoded output is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use offsetlog_core::{Offset, Payload};

use crate::error::ErrorCode;

/// `type` values a client may send as requests
pub const REQUEST_TYPES: &[&str] = &[
    "init",
    "send",
    "append",
    "poll",
    "commit_offsets",
    "list_committed_offsets",
];

/// A complete message: addressing plus body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender node or client id
    pub src: String,
    /// Receiver node or client id
    pub dest: String,
    /// Operation and correlation ids
    pub body: Body,
}

/// Message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Sender-local id used to correlate replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_id: Option<u64>,
    /// `msg_id` of the request this message answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<u64>,
    /// The operation, tagged by `type`
    #[serde(flatten)]
    pub op: Operation,
}

/// Every operation body, requests and replies alike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Handshake assigning this node its id
    Init {
        /// Id of the receiving node
        node_id: String,
        /// Ids of every node in the cluster
        #[serde(default)]
        node_ids: Vec<String>,
    },
    /// Handshake acknowledgement
    InitOk,

    /// Append `msg` to `key`
    #[serde(alias = "append")]
    Send {
        /// Queue key
        key: String,
        /// Record payload
        msg: Payload,
    },
    /// Offset assigned to an appended record
    SendOk {
        /// The new record's offset
        offset: Offset,
    },

    /// Read each key from its offset onward
    Poll {
        /// Key to starting offset
        offsets: BTreeMap<String, i64>,
    },
    /// Records per key, each as `[offset, payload]`
    PollOk {
        /// Key to records in offset order
        msgs: BTreeMap<String, Vec<(Offset, Payload)>>,
    },

    /// Commit each key up to its offset
    CommitOffsets {
        /// Key to last offset to commit
        offsets: BTreeMap<String, i64>,
    },
    /// Commit acknowledgement
    CommitOffsetsOk,

    /// Look up the commit watermark of each key
    ListCommittedOffsets {
        /// Keys to look up
        keys: Vec<String>,
    },
    /// Commit watermark per key
    ListCommittedOffsetsOk {
        /// Key to highest committed offset
        offsets: BTreeMap<String, Offset>,
    },

    /// A request failed
    Error {
        /// Numeric [`ErrorCode`]
        code: u32,
        /// Human-readable reason
        text: String,
    },
}

impl Operation {
    /// Build an `error` body
    pub fn error(code: ErrorCode, text: impl Into<String>) -> Self {
        Operation::Error {
            code: code.code(),
            text: text.into(),
        }
    }

    /// The `type` tag this operation encodes to
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Init { .. } => "init",
            Operation::InitOk => "init_ok",
            Operation::Send { .. } => "send",
            Operation::SendOk { .. } => "send_ok",
            Operation::Poll { .. } => "poll",
            Operation::PollOk { .. } => "poll_ok",
            Operation::CommitOffsets { .. } => "commit_offsets",
            Operation::CommitOffsetsOk => "commit_offsets_ok",
            Operation::ListCommittedOffsets { .. } => "list_committed_offsets",
            Operation::ListCommittedOffsetsOk { .. } => "list_committed_offsets_ok",
            Operation::Error { .. } => "error",
        }
    }

    /// The [`ErrorCode`] of an `error` body.
    ///
    /// `None` for other operations and for codes this node does not know.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Operation::Error { code, .. } => ErrorCode::from_code(*code),
            _ => None,
        }
    }

    /// Whether this operation is something a client asks for, as opposed
    /// to an acknowledgement or error
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Operation::Init { .. }
                | Operation::Send { .. }
                | Operation::Poll { .. }
                | Operation::CommitOffsets { .. }
                | Operation::ListCommittedOffsets { .. }
        )
    }
}

impl Message {
    /// Build a reply to this message.
    ///
    /// The reply goes back to this message's sender from `src`, answers
    /// this message's `msg_id`, and carries `msg_id` as its own id.
    pub fn reply(&self, src: impl Into<String>, msg_id: u64, op: Operation) -> Message {
        Message {
            src: src.into(),
            dest: self.src.clone(),
            body: Body {
                msg_id: Some(msg_id),
                in_reply_to: self.body.msg_id,
                op,
            },
        }
    }
}

// ============================================================================
// Envelope (fallback view)
// ============================================================================

/// Addressing and correlation fields only
///
/// Decoded when a line is valid JSON but its body does not match any
/// [`Operation`], so the node can still address an error reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// Sender node or client id
    pub src: String,
    /// Receiver node or client id
    pub dest: String,
    /// Correlation fields
    pub body: EnvelopeBody,
}

/// Body fields common to every message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvelopeBody {
    /// Sender-local message id
    #[serde(default)]
    pub msg_id: Option<u64>,
    /// The raw `type` tag, if present
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Envelope {
    /// Whether the `type` tag names a request this node understands
    pub fn is_known_request(&self) -> bool {
        self.body
            .kind
            .as_deref()
            .is_some_and(|kind| REQUEST_TYPES.contains(&kind))
    }

    /// Build an error reply addressed back to the sender
    pub fn error_reply(
        &self,
        src: impl Into<String>,
        msg_id: u64,
        code: ErrorCode,
        text: impl Into<String>,
    ) -> Message {
        Message {
            src: src.into(),
            dest: self.src.clone(),
            body: Body {
                msg_id: Some(msg_id),
                in_reply_to: self.body.msg_id,
                op: Operation::error(code, text),
            },
        }
    }
}

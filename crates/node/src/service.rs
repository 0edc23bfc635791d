//! Request dispatch
//!
//! [`Service`] turns decoded messages into engine calls and engine results
//! into replies. It does no I/O, so the whole protocol can be exercised
//! without a runtime.
//!
//! | Request | Engine call |
//! |---------|-------------|
//! | `init` | none (records the node id) |
//! | `send` | [`LogEngine::append`] |
//! | `poll` | [`LogEngine::poll_batch`] |
//! | `commit_offsets` | [`LogEngine::commit_batch`] |
//! | `list_committed_offsets` | [`LogEngine::list_committed_offsets`] |
//!
//! Engine errors become `error` replies carrying the matching
//! [`ErrorCode`]. Non-request messages (acks, errors) are dropped; inbound
//! errors are logged by code first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use offsetlog_core::LogError;
use offsetlog_engine::LogEngine;
use offsetlog_wire::{decode_envelope, ErrorCode, Message, Operation, WireError};

/// Protocol handler shared by every request task
pub struct Service {
    engine: Arc<LogEngine>,
    /// Set by `init`; `None` until then
    node_id: RwLock<Option<String>>,
    next_msg_id: AtomicU64,
}

impl Service {
    /// Create a service over `engine`
    pub fn new(engine: Arc<LogEngine>) -> Self {
        Self {
            engine,
            node_id: RwLock::new(None),
            next_msg_id: AtomicU64::new(1),
        }
    }

    /// The engine requests are applied to
    pub fn engine(&self) -> &Arc<LogEngine> {
        &self.engine
    }

    /// Id assigned by `init`, if it has arrived
    pub fn node_id(&self) -> Option<String> {
        self.node_id.read().clone()
    }

    fn next_msg_id(&self) -> u64 {
        self.next_msg_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Sender id for replies: our node id once known, otherwise whatever
    /// the client addressed us as.
    fn reply_src(&self, request_dest: &str) -> String {
        self.node_id
            .read()
            .clone()
            .unwrap_or_else(|| request_dest.to_owned())
    }

    /// Handle a decoded message.
    ///
    /// Returns the reply to send, or `None` for messages that are not
    /// requests.
    pub fn handle(&self, message: &Message) -> Option<Message> {
        let op = &message.body.op;
        if let Operation::Error { code, text } = op {
            let known = op.error_code();
            warn!(
                src = %message.src,
                code,
                kind = ?known,
                definite = known.map_or(false, ErrorCode::is_definite),
                text = %text,
                "peer reported an error"
            );
            return None;
        }
        if !op.is_request() {
            debug!(src = %message.src, kind = op.kind(), "dropping non-request message");
            return None;
        }

        debug!(src = %message.src, kind = op.kind(), msg_id = ?message.body.msg_id, "handling request");
        let reply = match self.dispatch(op) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(src = %message.src, kind = op.kind(), error = %e, "request failed");
                Operation::error(ErrorCode::from(&e), e.to_string())
            }
        };

        Some(message.reply(self.reply_src(&message.dest), self.next_msg_id(), reply))
    }

    fn dispatch(&self, op: &Operation) -> Result<Operation, LogError> {
        match op {
            Operation::Init { node_id, node_ids } => {
                info!(node_id = %node_id, cluster_size = node_ids.len(), "node initialized");
                *self.node_id.write() = Some(node_id.clone());
                Ok(Operation::InitOk)
            }
            Operation::Send { key, msg } => Ok(Operation::SendOk {
                offset: self.engine.append(key, *msg),
            }),
            Operation::Poll { offsets } => {
                let msgs = self
                    .engine
                    .poll_batch(offsets.iter().map(|(key, from)| (key, *from)))?;
                Ok(Operation::PollOk { msgs })
            }
            Operation::CommitOffsets { offsets } => {
                self.engine
                    .commit_batch(offsets.iter().map(|(key, upto)| (key, *upto)))?;
                Ok(Operation::CommitOffsetsOk)
            }
            Operation::ListCommittedOffsets { keys } => {
                let offsets = self.engine.list_committed_offsets(keys)?;
                Ok(Operation::ListCommittedOffsetsOk { offsets })
            }
            other => Err(LogError::invalid_argument(format!(
                "{} is not a request",
                other.kind()
            ))),
        }
    }

    /// Build the reply to a line that failed to decode.
    ///
    /// Known request types get `MalformedRequest`, unknown types
    /// `NotSupported`. Lines without a usable envelope, and malformed
    /// replies, get no answer.
    pub fn reject(&self, line: &str, error: &WireError) -> Option<Message> {
        let envelope = match decode_envelope(line) {
            Ok(envelope) => envelope,
            Err(_) => {
                warn!(error = %error, "dropping line without a message envelope");
                return None;
            }
        };

        let kind = envelope.body.kind.as_deref().unwrap_or("");
        if kind == "error" || kind.ends_with("_ok") {
            warn!(src = %envelope.src, kind, error = %error, "dropping malformed reply");
            return None;
        }

        let code = if envelope.is_known_request() {
            ErrorCode::MalformedRequest
        } else {
            ErrorCode::NotSupported
        };
        warn!(src = %envelope.src, kind, code = code.code(), error = %error, "rejecting message");
        Some(envelope.error_reply(
            self.reply_src(&envelope.dest),
            self.next_msg_id(),
            code,
            error.to_string(),
        ))
    }

    /// Build a `Crash` error reply for a request whose handler failed
    pub fn crash_reply(&self, request: &Message, reason: &str) -> Message {
        request.reply(
            self.reply_src(&request.dest),
            self.next_msg_id(),
            Operation::error(ErrorCode::Crash, reason),
        )
    }
}

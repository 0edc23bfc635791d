//! Wire error types
//!
//! Two kinds of error live here:
//! - [`WireError`]: a line could not be decoded or a message could not be
//!   written (local failures of the codec)
//! - [`ErrorCode`]: the numeric code carried by an `error` reply, sent to the
//!   peer when a request fails
//!
//! ## Error Codes
//!
//! | Code | Name | Raised for |
//! |------|------|------------|
//! | 0 | Timeout | never raised by the node, logged when a peer reports it |
//! | 10 | NotSupported | unknown or reply-only message type |
//! | 11 | TemporarilyUnavailable | never raised by the node, logged when a peer reports it |
//! | 12 | MalformedRequest | body does not match its type, invalid argument |
//! | 13 | Crash | internal failure while handling a request |
//! | 14 | Abort | never raised by the node, logged when a peer reports it |
//! | 20 | KeyDoesNotExist | `QueueNotFound` |

use std::io;

use thiserror::Error;

use offsetlog_core::LogError;

/// Codec failures
#[derive(Debug, Error)]
pub enum WireError {
    /// Input was not valid JSON or did not match the message schema
    #[error("invalid message: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the stream failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Code carried by an `error` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request timed out
    Timeout,
    /// The message type is not handled by this node
    NotSupported,
    /// The node cannot serve the request right now
    TemporarilyUnavailable,
    /// The request could not be interpreted
    MalformedRequest,
    /// The node failed while handling the request
    Crash,
    /// The operation was aborted
    Abort,
    /// The request named a key that does not exist
    KeyDoesNotExist,
}

impl ErrorCode {
    /// Numeric wire value
    pub fn code(self) -> u32 {
        match self {
            ErrorCode::Timeout => 0,
            ErrorCode::NotSupported => 10,
            ErrorCode::TemporarilyUnavailable => 11,
            ErrorCode::MalformedRequest => 12,
            ErrorCode::Crash => 13,
            ErrorCode::Abort => 14,
            ErrorCode::KeyDoesNotExist => 20,
        }
    }

    /// Parse a numeric wire value
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::Timeout),
            10 => Some(ErrorCode::NotSupported),
            11 => Some(ErrorCode::TemporarilyUnavailable),
            12 => Some(ErrorCode::MalformedRequest),
            13 => Some(ErrorCode::Crash),
            14 => Some(ErrorCode::Abort),
            20 => Some(ErrorCode::KeyDoesNotExist),
            _ => None,
        }
    }

    /// Whether the failed request is known to have had no effect
    ///
    /// Timeouts and crashes are indefinite: the operation may or may not
    /// have been applied.
    pub fn is_definite(self) -> bool {
        !matches!(self, ErrorCode::Timeout | ErrorCode::Crash)
    }
}

impl From<&LogError> for ErrorCode {
    fn from(e: &LogError) -> Self {
        match e {
            LogError::QueueNotFound { .. } => ErrorCode::KeyDoesNotExist,
            LogError::InvalidArgument { .. } => ErrorCode::MalformedRequest,
        }
    }
}

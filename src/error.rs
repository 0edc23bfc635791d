//! Unified error type for offsetlog.
//!
//! Wraps the errors of every layer behind one stable enum.

use thiserror::Error;

use offsetlog_core::LogError;
use offsetlog_wire::WireError;

/// All offsetlog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The key has no queue
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad input or configuration
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for offsetlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error was caused by the caller's input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

// Convert from engine errors
impl From<LogError> for Error {
    fn from(e: LogError) -> Self {
        match e {
            LogError::QueueNotFound { key } => Error::NotFound(format!("queue {:?}", key)),
            LogError::InvalidArgument { reason } => Error::InvalidArgument(reason),
        }
    }
}

// Convert from wire codec errors
impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        match e {
            WireError::Json(json) => Error::Serialization(json.to_string()),
            WireError::Io(io) => Error::Io(io),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

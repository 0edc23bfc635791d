//! Error types for the log
//!
//! [`LogError`] is the single error type returned by engine operations.
//! Every variant carries enough context to name the failing key or argument,
//! so transports can build their own failure replies without extra lookups.

use thiserror::Error;

/// Result type alias for log operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors raised by log operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// The key has never been appended to
    ///
    /// Raised by poll, commit and watermark lookups. Append never raises it
    /// because append creates the queue.
    #[error("queue {key:?} not found")]
    QueueNotFound {
        /// The key that has no queue
        key: String,
    },

    /// Malformed input rejected before touching any queue
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input
        reason: String,
    },
}

impl LogError {
    /// Build a [`LogError::QueueNotFound`] for `key`
    pub fn queue_not_found(key: impl Into<String>) -> Self {
        LogError::QueueNotFound { key: key.into() }
    }

    /// Build a [`LogError::InvalidArgument`]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        LogError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::QueueNotFound { .. })
    }

    /// Check if this error was caused by bad input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LogError::InvalidArgument { .. })
    }

    /// The key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            LogError::QueueNotFound { key } => Some(key),
            LogError::InvalidArgument { .. } => None,
        }
    }
}

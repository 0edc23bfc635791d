//! Convenient imports for offsetlog.
//!
//! ```
//! use offsetlog::prelude::*;
//!
//! let log = LogEngine::with_config(&EngineConfig::small())?;
//! log.append("k", 1);
//! # Ok::<(), offsetlog::Error>(())
//! ```

// Main entry point
pub use crate::{EngineConfig, EngineStats, LogEngine};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::{Offset, Payload, Record};

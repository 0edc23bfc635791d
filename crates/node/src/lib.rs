//! Node process for offsetlog
//!
//! Serves the line-delimited JSON protocol from `offsetlog-wire` on top of a
//! [`LogEngine`](offsetlog_engine::LogEngine):
//!
//! - [`service`]: maps requests to engine calls and results to replies
//! - [`runtime`]: concurrent read/dispatch/write loop over async streams
//! - [`config`]: TOML configuration
//! - [`cli`]: command-line flags
//! - [`logging`]: tracing subscriber writing to stderr

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod service;

pub use config::{ConfigError, NodeConfig};
pub use runtime::run;
pub use service::Service;

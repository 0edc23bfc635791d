//! Node configuration
//!
//! Loaded from an optional TOML file and then overridden by command-line
//! flags (see [`crate::cli`]). Every field has a default, so an empty file
//! and no file at all behave the same.
//!
//! ```toml
//! log_level = "debug"
//! ansi = false
//!
//! [engine]
//! initial_capacity = 256
//! shard_amount = 16
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use offsetlog_core::LogError;
use offsetlog_engine::EngineConfig;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown fields
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds invalid values
    #[error("invalid config: {0}")]
    Invalid(#[from] LogError),
}

/// Node process configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Default log filter; `RUST_LOG` takes precedence when set
    pub log_level: String,
    /// Colour log output
    pub ansi: bool,
    /// Engine sizing
    pub engine: EngineConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            log_level: "info".to_string(),
            ansi: false,
            engine: EngineConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        Ok(())
    }
}

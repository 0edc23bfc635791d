//! Command-line interface
//!
//! Flags override values from the config file:
//!
//! ```text
//! offsetlog-node [--config PATH] [--log-level LEVEL] [--ansi | --no-ansi]
//! ```

use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::config::{ConfigError, NodeConfig};

/// Build the clap command
pub fn build_cli() -> Command {
    Command::new("offsetlog-node")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve the offsetlog protocol on stdin/stdout")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("TOML config file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter, e.g. info or offsetlog_engine=trace (RUST_LOG wins)"),
        )
        .arg(
            Arg::new("ansi")
                .long("ansi")
                .action(ArgAction::SetTrue)
                .help("Colour log output"),
        )
        .arg(
            Arg::new("no-ansi")
                .long("no-ansi")
                .action(ArgAction::SetTrue)
                .conflicts_with("ansi")
                .help("Plain log output"),
        )
}

/// Load the config file named by `--config` (or defaults) and apply flags.
pub fn resolve_config(matches: &ArgMatches) -> Result<NodeConfig, ConfigError> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => NodeConfig::load(Path::new(path))?,
        None => NodeConfig::default(),
    };

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = level.clone();
    }
    if matches.get_flag("ansi") {
        config.ansi = true;
    }
    if matches.get_flag("no-ansi") {
        config.ansi = false;
    }
    Ok(config)
}

//! `offsetlog-node`: serve the offsetlog protocol on stdin/stdout.
//!
//! ```bash
//! offsetlog-node --config node.toml --log-level debug
//! ```

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use offsetlog_engine::LogEngine;
use offsetlog_node::cli::{build_cli, resolve_config};
use offsetlog_node::logging::init_tracing;
use offsetlog_node::{run, Service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    let config = resolve_config(&matches)?;
    init_tracing(&config.log_level, config.ansi)?;

    let engine = Arc::new(
        LogEngine::with_config(&config.engine).context("failed to build log engine")?,
    );
    let service = Arc::new(Service::new(Arc::clone(&engine)));

    info!(
        initial_capacity = config.engine.initial_capacity,
        shard_amount = ?config.engine.shard_amount,
        "node starting"
    );
    run(tokio::io::stdin(), tokio::io::stdout(), service)
        .await
        .context("protocol loop failed")?;

    let stats = engine.stats();
    info!(
        queues = stats.queues,
        records = stats.records,
        committed = stats.committed,
        "node stopped"
    );
    Ok(())
}

//! Time-capsule HTTP server.
//!
//! # Responsibility
//! - Wire configuration, logging and the capsule service together.
//! - Serve the capsule API over plain HTTP.

mod routes;

use anyhow::Context;
use clap::Parser;
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use timecapsule_core::{default_log_level, init_logging, CapsuleService, JsonFileStore};

#[derive(Debug, Parser)]
#[command(name = "timecapsule-server", about = "Time-capsule HTTP server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "TIMECAPSULE_PORT", default_value_t = 3000)]
    port: u16,

    /// Path to the JSON backing file.
    #[arg(long, env = "TIMECAPSULE_DATA", default_value = "capsules.json")]
    data_file: PathBuf,

    /// Directory for rolling log files.
    #[arg(long, env = "TIMECAPSULE_LOG_DIR", default_value = "logs")]
    log_dir: String,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "TIMECAPSULE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, &args.log_dir).map_err(|err| anyhow::anyhow!(err))?;

    let service = Arc::new(CapsuleService::new(JsonFileStore::new(&args.data_file)));
    let app = routes::router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "event=server_start module=server status=ok addr={} data_file={}",
        addr,
        args.data_file.display()
    );
    println!("Server running on http://localhost:{}", args.port);

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}

//! `sealbox` — server binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Prepare the spool directory: create it, sweep leftover artifacts.
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod server;
mod storage;
mod telemetry;
mod upload;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use server::state::AppState;
use storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "sealbox starting"
    );

    // -----------------------------------------------------------------------
    // 3. Spool directory
    // -----------------------------------------------------------------------
    let storage = Storage::new(&cfg.uploads_dir);
    storage
        .ensure()
        .await
        .with_context(|| format!("failed to create spool directory {}", cfg.uploads_dir))?;
    let swept = storage
        .sweep()
        .await
        .context("failed to sweep spool directory")?;
    if swept > 0 {
        info!(count = swept, "removed leftover spool files");
    }

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(storage);
    let router = server::router::build(state, cfg.max_upload_bytes);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

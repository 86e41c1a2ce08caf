//! Tracing subscriber initialisation.
//!
//! # Telemetry invariants
//!
//! - **No password or key material** must appear in any span attribute or log
//!   field. File names and algorithm names are the only request data logged.
//! - Log level is configurable via `RUST_LOG`, falling back to `LOG_LEVEL`
//!   (default: `info`).

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Configures a JSON-formatted [`tracing_subscriber`] layer for structured
/// log output, filtered by `RUST_LOG` or the configured fallback level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}

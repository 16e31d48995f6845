//! Tracing setup.
//!
//! Logs go to `<INPUTBAR_HOME>/logs/inputbar.log` so interactive output on
//! stdout stays clean. The filter comes from `INPUTBAR_LOG` (then `RUST_LOG`),
//! defaulting to info for this workspace's crates.

use std::fs;

use anyhow::{Context, Result};
use inputbar_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "inputbar=info,inputbar_core=info";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init_logging() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("create log dir {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, "inputbar.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("INPUTBAR_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}

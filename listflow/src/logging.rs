//! Diagnostic logging for ListFlow.
//!
//! Every load, save, listing, mutation and rejected input emits one `tracing`
//! event. Events go to a size-capped rotating file (see `io::log_file`), never
//! to the terminal, so they do not interleave with the menu.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::io::config::LogConfig;
use crate::io::log_file::{RotatingFile, RotatingMakeWriter};

/// Initialize the global tracing subscriber writing to `config.file`.
///
/// Reads `RUST_LOG`; falls back to `config.level` if unset or unparsable.
/// Lines carry a timestamp, level, target and message.
///
/// # Example
/// ```bash
/// RUST_LOG=listflow=debug listflow list
/// ```
pub fn init(config: &LogConfig) -> Result<()> {
    let file = RotatingFile::open(&config.file, config.max_bytes, config.backups)
        .with_context(|| format!("open log file {}", config.file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.trim()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(RotatingMakeWriter::new(file)),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

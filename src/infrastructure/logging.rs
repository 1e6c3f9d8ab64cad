use anyhow::{anyhow, Result};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use super::paths::AppPaths;

/// Routes `tracing` output to the app's log file. Must run before the
/// terminal enters raw mode; stdout is off-limits once the TUI owns it.
pub fn init(paths: &AppPaths) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing tracing subscriber: {err}"))
}

use std::fs::OpenOptions;
use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

/// Sends `tracing` output to `path`; the terminal itself belongs to the UI.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .wrap_err("failed to install log subscriber")?;
    Ok(Some(guard))
}

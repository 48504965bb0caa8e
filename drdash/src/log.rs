use std::{fs::File, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub const LOG_FILE: &str = "drdash.log";

/// Sends all tracing output to `<log_dir>/drdash.log`.
///
/// The terminal belongs to the dashboard, so nothing is ever written to
/// stdout or stderr. Calling this twice keeps the first subscriber.
pub fn setup_logger(log_dir: &Path, filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {filter:?}"))?;

    let path = log_dir.join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(non_blocking_writer)
        .with_filter(filter);

    if LOG_GUARD.set(guard).is_ok() {
        tracing_subscriber::registry().with(file_layer).try_init().ok();
    }

    Ok(())
}

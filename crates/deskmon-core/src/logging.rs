//! Logging setup for deskmon.
//!
//! Headless commands log to stderr. The TUI logs to a file instead so
//! nothing is written to the terminal while the alternate screen is active.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::paths;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initializes stderr logging for headless commands.
///
/// Verbosity is controlled with RUST_LOG and defaults to warn.
pub fn init_headless() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Initializes file logging for the TUI session.
///
/// Events go to ${DESKMON_HOME}/logs/deskmon.log. The returned guard
/// flushes buffered events on drop and must outlive the session.
pub fn init_tui() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, "deskmon.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();

    Ok(guard)
}

// SPDX-License-Identifier: MIT
//
// Logging setup.
//
// The terminal is in raw mode on the alternate screen while roku runs, so
// logs can never go to stdout or stderr. They go to a file, and only when
// one is asked for with `--log-file`. The level comes from `ROKU_LOG`
// using the usual `EnvFilter` syntax (`debug`, `roku_editor=trace`, ...),
// defaulting to `warn`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ROKU_LOG";

/// Install the global subscriber writing to `log_file`.
///
/// Returns the appender's flush guard; keep it alive until exit or the
/// last lines may be lost. Without a log file nothing is installed and
/// every `tracing` macro is a no-op.
///
/// # Errors
///
/// The log file's directory cannot be determined or a subscriber is
/// already installed.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = log_file else {
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("could not install the log subscriber")?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(Some(guard))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

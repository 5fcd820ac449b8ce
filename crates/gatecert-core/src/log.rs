//! Logging system for gatecert.
//!
//! Structured `tracing` output to stderr or a log file, in compact, pretty or
//! JSON format. `GATECERT_LOG` takes precedence over the configured level and
//! accepts full `EnvFilter` directives.

use crate::util::expand_path;
use gatecert_types::config::{LogConfig, LogFormat};
use gatecert_types::{GatecertError, LogLevel, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "GATECERT_LOG";

/// Filter directive for all gatecert crates at `level`.
pub fn default_directive(level: LogLevel) -> String {
    format!("gatecert={}", level.as_filter())
}

/// Initialize the global subscriber.
///
/// `level` overrides the configured level (the CLI passes `--verbose` here).
/// When logging to a file the returned guard must be held until exit so that
/// buffered lines are flushed.
pub fn init(config: &LogConfig, level: Option<LogLevel>) -> Result<Option<WorkerGuard>> {
    let level = level.unwrap_or(config.level);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let (writer, guard) = match &config.path {
        Some(path) => {
            let path = expand_path(path);
            let file_name = path.file_name().ok_or_else(|| {
                GatecertError::Config(format!("Log path has no file name: {}", path.display()))
            })?;
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.path.is_none())
        .with_target(false);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| GatecertError::Config(format!("Failed to initialize logging: {}", e)))?;
    Ok(guard)
}

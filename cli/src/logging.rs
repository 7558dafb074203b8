use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel};

const LOG_PREFIX: &str = "vitals";

static INIT: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Rolling file; the TUI owns the terminal.
    File,
    Stderr,
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let effective_level = cli_override.unwrap_or(level);

        let Some(tracing_level) = effective_level.as_tracing_level() else {
            return;
        };

        guard = match mode {
            LogMode::File => init_file_logging(tracing_level),
            LogMode::Stderr => {
                init_stderr_logging(tracing_level);
                None
            }
        };
    });

    LogGuard { _guard: guard }
}

fn build_env_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match "ureq=warn".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn init_file_logging(level: Level) -> Option<WorkerGuard> {
    let log_dir = runtime_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return None;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(file_layer)
        .init();

    Some(guard)
}

fn init_stderr_logging(level: Level) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(stderr_layer)
        .init();
}

/// Directory holding the TUI's rolling log files.
pub fn log_dir() -> PathBuf {
    runtime_dir()
}

mod app;
mod backend;
mod cli;
mod commands;
mod config;
mod data;
mod input;
mod logging;
mod sync;
mod theme;
mod ui;

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::runtime::Runtime;

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

/// How long exit waits for an in-flight upload before abandoning it.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let mut config = UserConfig::load();
    config.merge_with_args(
        cli.appearance.as_deref(),
        cli.backend_url.as_deref(),
        cli.export.clone(),
    );
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    match cli.command {
        Some(Commands::Config { path, reset }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::config::run(path, reset)
        }
        Some(Commands::Sync { compact }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            let runtime = build_runtime()?;
            commands::sync::run(&config, &runtime, compact)
        }
        Some(Commands::Ui) | None => {
            let _guard = logging::init(config.log_level, LogMode::File, log_level_override);
            let runtime = build_runtime()?;
            let result = app::run_tui(config, runtime.handle().clone());
            shutdown_runtime(runtime);
            result
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("vitals-sync")
        .enable_all()
        .build()?)
}

/// Stops the runtime without blocking on `spawn_blocking` work such as a
/// stalled upload; dropping it would wait for the HTTP timeout.
fn shutdown_runtime(runtime: Runtime) {
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
}

#![doc = include_str!("../README.md")]

mod app;
mod config;
mod progress;
mod telemetry;

use clap::Parser;
use config::{CliArgs, Settings};
use keyspace::{ShutdownCoordinator, watch_signals};
use std::process::ExitCode;
use telemetry::init_telemetry;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    if let Err(e) = init_telemetry() {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let settings = match Settings::try_from(args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(app::settings_exit_code(&e));
        }
    };
    log_startup_info(&settings);

    let shutdown = ShutdownCoordinator::new();
    let signals = tokio::spawn(watch_signals(shutdown.clone()));

    let result = app::execute(&settings, shutdown).await;
    signals.abort();

    match result {
        Ok(report) => {
            eprintln!("{report}");
            ExitCode::from(report.outcome.exit_code())
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(app::exit_code(&e))
        }
    }
}

fn log_startup_info(_settings: &Settings) {
    if cfg!(debug_assertions) {
        #[cfg(feature = "tracing")]
        tracing::info!("Starting keyspace with full settings: {:#?}", _settings);
    } else {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Starting keyspace: {} mode, lengths {}..={}, {} workers",
            _settings.generation.mode,
            _settings.generation.min_length,
            _settings.generation.max_length,
            _settings.generation.workers
        );
    }
}

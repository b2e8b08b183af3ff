#![forbid(unsafe_code)]

mod cli;
mod color;
mod config;
mod constants;
mod defaults;
mod exchange;
mod gui;
mod matrix;
mod modes;
mod registry;
mod render;
mod selection;
mod state;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use config::Settings;

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings are read before logging so the file can choose the level;
    // LOG_LEVEL still wins
    let settings = Settings::load();
    let level = std::env::var("LOG_LEVEL").ok().unwrap_or_else(|| {
        settings
            .as_ref()
            .map(|s| s.log_level.clone())
            .unwrap_or_else(|_| "info".to_string())
    });

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&level))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;

    let settings = settings.inspect_err(|e| {
        error!(path = %Settings::path().display(), error = %e, "Please fix the syntax errors in your settings file");
    })?;

    cli::run(cli, settings)
}

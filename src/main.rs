//! Watchlist quote monitor CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use ticker_config::load_config;
use ticker_monitor::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.logging.format
    };
    let _guard = setup_logging(&level, format, config.logging.file.as_deref());

    // Execute command
    match cli.command {
        Commands::Watch(args) => cli::commands::watch::run(args, &config).await,
        Commands::Quote(args) => cli::commands::quote::run(args, &config).await,
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Watchlist(cmd) => cli::commands::watchlist::run(cmd, &config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config),
    }
}

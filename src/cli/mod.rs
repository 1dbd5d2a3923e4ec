//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ticker")]
#[command(author, version, about = "Watchlist quote monitor with technical analysis reports")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "TICKER_CONFIG")]
    pub config: PathBuf,

    /// Log level, overrides the configured one
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the watchlist and print quote lines every tick
    Watch(WatchArgs),
    /// Fetch quotes once
    Quote(QuoteArgs),
    /// Run the technical analysis report
    Analyze(AnalyzeArgs),
    /// Maintain the watchlist file
    #[command(subcommand)]
    Watchlist(WatchlistCommand),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Poll interval in seconds, overrides the configured one
    #[arg(short, long)]
    pub interval_secs: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<usize>,
}

#[derive(clap::Args)]
pub struct QuoteArgs {
    /// Symbols to quote (comma-separated), defaults to the watchlist
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbols to analyse (comma-separated), defaults to `analysis.default_symbols`
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Score against the live quote instead of the last close
    #[arg(long)]
    pub live: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(Subcommand)]
pub enum WatchlistCommand {
    /// List watchlist entries
    List,
    /// Add an entry or rename an existing one
    Add {
        /// Instrument code, e.g. sh000001, gds_AUTD, nf_AU0
        code: String,
        /// Display name
        name: String,
    },
    /// Remove an entry
    Remove {
        /// Instrument code
        code: String,
    },
}

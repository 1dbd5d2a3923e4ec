//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ticker_core::error::TickerError;
use ticker_data::FeedEndpoints;
use ticker_monitor::LogFormat;

/// Fewest daily bars that still allow MACD(12,26,9).
pub const MIN_BAR_DAYS: usize = 35;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub feeds: FeedEndpoints,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub watchlist: WatchlistSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    /// Reject settings the monitor cannot run with.
    pub fn validate(&self) -> Result<(), TickerError> {
        if self.poll.interval_secs == 0 {
            return Err(TickerError::Validation(
                "poll.interval_secs must be greater than zero".into(),
            ));
        }
        if self.feeds.timeout_ms == 0 {
            return Err(TickerError::Validation(
                "feeds.timeout_ms must be greater than zero".into(),
            ));
        }
        if self.feeds.timeout_ms >= self.poll.interval_secs.saturating_mul(1_000) {
            return Err(TickerError::Validation(format!(
                "feeds.timeout_ms ({}) must be shorter than poll.interval_secs ({} s)",
                self.feeds.timeout_ms, self.poll.interval_secs
            )));
        }
        if self.analysis.bar_days < MIN_BAR_DAYS {
            return Err(TickerError::Validation(format!(
                "analysis.bar_days must be at least {MIN_BAR_DAYS}, got {}",
                self.analysis.bar_days
            )));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "ticker".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// Quote polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub interval_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self { interval_secs: 3 }
    }
}

/// Watchlist file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistSettings {
    pub path: PathBuf,
}

impl Default for WatchlistSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("stock_config.json"),
        }
    }
}

/// Analysis command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Daily bars requested per instrument
    pub bar_days: usize,
    /// Instruments analysed when none are given on the command line
    pub default_symbols: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            bar_days: 100,
            default_symbols: vec!["sh588000".to_string(), "sh000832".to_string()],
        }
    }
}

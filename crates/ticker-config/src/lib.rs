//! Configuration and watchlist persistence.

mod settings;
mod watchlist;

pub use settings::{
    AnalysisSettings, AppConfig, AppSettings, LoggingConfig, PollSettings, WatchlistSettings,
    MIN_BAR_DAYS,
};
pub use watchlist::WatchlistFile;

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Missing keys fall back to defaults; `TICKER__POLL__INTERVAL_SECS=1`
/// overrides `poll.interval_secs`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("TICKER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("absent.toml")).unwrap();

        assert_eq!(config.poll.interval_secs, 3);
        assert_eq!(config.feeds.general_url, "http://qt.gtimg.cn/q=");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ticker.toml");
        fs::write(
            &path,
            r#"
[feeds]
timeout_ms = 500

[analysis]
bar_days = 60
default_symbols = ["sz399001"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.feeds.timeout_ms, 500);
        assert_eq!(config.feeds.sina_referer, "https://finance.sina.com.cn");
        assert_eq!(config.analysis.bar_days, 60);
        assert_eq!(config.analysis.default_symbols, vec!["sz399001"]);
        assert!(config.validate().is_ok());
    }
}

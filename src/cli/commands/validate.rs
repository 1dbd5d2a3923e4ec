//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ticker_config::AppConfig;

pub fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {} ({})", config.logging.level, config.logging.format);
    println!("Poll interval: {}s", config.poll.interval_secs);
    println!("Feed timeout: {}ms", config.feeds.timeout_ms);
    println!("Watchlist: {}", config.watchlist.path.display());
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}

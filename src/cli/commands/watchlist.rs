//! Watchlist maintenance commands.

use anyhow::{Context, Result};
use ticker_config::{AppConfig, WatchlistFile};
use ticker_data::QuoteSourceRouter;
use tracing::info;

use crate::cli::WatchlistCommand;

pub fn run(cmd: WatchlistCommand, config: &AppConfig) -> Result<()> {
    let path = &config.watchlist.path;
    let mut watchlist = WatchlistFile::load_or_default(path);

    match cmd {
        WatchlistCommand::List => {
            let router = QuoteSourceRouter::new();
            println!("Watchlist: {}", path.display());
            for stock in &watchlist.stocks {
                let route = router.route(&stock.identifier);
                println!(
                    "  {:<12} {:<16} {}",
                    stock.identifier, stock.display_name, route.dialect
                );
            }
            return Ok(());
        }
        WatchlistCommand::Add { code, name } => {
            let code = code.trim();
            if code.is_empty() {
                anyhow::bail!("Instrument code must not be empty");
            }
            let replaced = watchlist.upsert(code, name.trim());
            info!(code, replaced, "Updated watchlist");
            println!("{} {}", if replaced { "Renamed" } else { "Added" }, code);
        }
        WatchlistCommand::Remove { code } => {
            if !watchlist.remove(&code) {
                anyhow::bail!("{} is not on the watchlist", code);
            }
            info!(code = %code, "Removed from watchlist");
            println!("Removed {}", code);
        }
    }

    watchlist
        .save(path)
        .with_context(|| format!("Failed to save watchlist to {}", path.display()))
}

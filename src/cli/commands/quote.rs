//! One-shot quote command.

use anyhow::{Context, Result};
use ticker_config::{AppConfig, WatchlistFile};
use ticker_core::traits::QuoteFeed;
use ticker_data::HttpFeed;
use ticker_monitor::format_quote_line;
use tracing::info;

use super::{direction_marker, resolve_instruments};
use crate::cli::QuoteArgs;

pub async fn run(args: QuoteArgs, config: &AppConfig) -> Result<()> {
    let watchlist = WatchlistFile::load_or_default(&config.watchlist.path);
    let instruments = if args.symbols.is_empty() {
        watchlist.stocks.clone()
    } else {
        resolve_instruments(&args.symbols, &watchlist)
    };

    let feed = HttpFeed::new(config.feeds.clone()).context("Failed to create quote feed")?;
    let quotes = feed
        .fetch_quotes(&instruments)
        .await
        .context("Failed to fetch quotes")?;
    info!(requested = instruments.len(), received = quotes.len(), "Fetched quotes");

    match args.output.as_str() {
        "json" => {
            let ordered: Vec<_> = instruments
                .iter()
                .filter_map(|i| quotes.get(&i.identifier))
                .collect();
            println!("{}", serde_json::to_string_pretty(&ordered)?);
        }
        _ => {
            for instrument in &instruments {
                let line = format_quote_line(
                    instrument,
                    quotes.get(&instrument.identifier),
                    &watchlist.preferences,
                );
                println!("{} {}", direction_marker(line.direction), line.text);
            }
        }
    }

    Ok(())
}

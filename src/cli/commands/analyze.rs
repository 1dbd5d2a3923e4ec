//! Analyze command implementation.

use anyhow::{Context, Result};
use std::sync::Arc;
use ticker_analysis::{render_report, Analyzer};
use ticker_config::{AppConfig, WatchlistFile};
use ticker_core::traits::QuoteFeed;
use ticker_core::types::QuoteMap;
use ticker_data::HttpFeed;
use tracing::{info, warn};

use super::resolve_instruments;
use crate::cli::AnalyzeArgs;

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    config.validate()?;

    let symbols = if args.symbols.is_empty() {
        &config.analysis.default_symbols
    } else {
        &args.symbols
    };
    let watchlist = WatchlistFile::load_or_default(&config.watchlist.path);
    let instruments = resolve_instruments(symbols, &watchlist);
    if instruments.is_empty() {
        anyhow::bail!("No symbols to analyse. Pass -S sh000001 or set analysis.default_symbols");
    }

    let feed = Arc::new(HttpFeed::new(config.feeds.clone()).context("Failed to create feed")?);

    let live = if args.live {
        feed.fetch_quotes(&instruments).await.unwrap_or_else(|e| {
            warn!(error = %e, "Live quotes unavailable, scoring against last close");
            QuoteMap::new()
        })
    } else {
        QuoteMap::new()
    };

    info!(
        instruments = instruments.len(),
        bar_days = config.analysis.bar_days,
        "Starting analysis"
    );
    let analyzer = Analyzer::new(feed, config.analysis.bar_days);

    let mut reports = Vec::with_capacity(instruments.len());
    for instrument in &instruments {
        let live_price = live.get(&instrument.identifier).map(|q| q.price);
        reports.push(analyzer.analyze(instrument, live_price).await);
    }

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&reports)?),
        _ => {
            for report in &reports {
                println!("{}", render_report(report));
            }
        }
    }

    Ok(())
}

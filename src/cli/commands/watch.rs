//! Watch command implementation.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use ticker_config::{AppConfig, WatchlistFile};
use ticker_data::HttpFeed;
use ticker_monitor::{format_quote_line, PollUpdate, QuotePoller, SessionTracker};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::direction_marker;
use crate::cli::WatchArgs;

pub async fn run(args: WatchArgs, config: &AppConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(secs) = args.interval_secs {
        config.poll.interval_secs = secs;
    }
    config.validate()?;

    let path = config.watchlist.path.clone();
    let mut watchlist = WatchlistFile::load_or_default(&path);
    if watchlist.stocks.is_empty() {
        anyhow::bail!("Watchlist is empty. Add an entry with `ticker watchlist add <code> <name>`");
    }

    let mut tracker = SessionTracker::default();
    if let Some(snapshot) = &watchlist.session {
        tracker.restore(snapshot);
    }

    let feed = HttpFeed::new(config.feeds.clone()).context("Failed to create quote feed")?;
    let period = Duration::from_secs(config.poll.interval_secs);
    let poller = QuotePoller::new(Arc::new(feed), watchlist.stocks.clone(), tracker, period);

    let (tx, mut rx) = mpsc::channel(8);
    let handle = tokio::spawn(poller.run(tx));

    let mut ticks = 0usize;
    loop {
        tokio::select! {
            update = rx.recv() => {
                let Some(update) = update else { break };
                print_update(&watchlist, &update);

                if watchlist.session.as_ref() != Some(&update.session) {
                    watchlist.session = Some(update.session);
                    if let Err(e) = watchlist.save(&path) {
                        warn!(error = %e, "Failed to persist session state");
                    }
                }

                ticks += 1;
                if args.ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping poller");
                break;
            }
        }
    }

    // Dropping the receiver stops the poller, abandoning any fetch in flight.
    drop(rx);
    let tracker = handle.await.context("Poller task failed")?;

    watchlist.session = Some(tracker.snapshot());
    watchlist
        .save(&path)
        .with_context(|| format!("Failed to save watchlist to {}", path.display()))?;

    Ok(())
}

fn print_update(watchlist: &WatchlistFile, update: &PollUpdate) {
    println!("--- {} ---", update.at.format("%H:%M:%S"));

    for instrument in &watchlist.stocks {
        let line = format_quote_line(
            instrument,
            update.quotes.get(&instrument.identifier),
            &watchlist.preferences,
        );
        println!("{} {}", direction_marker(line.direction), line.text);
    }

    if !watchlist.preferences.alert_on_moves {
        return;
    }

    for event in &update.events {
        let name = watchlist
            .stocks
            .iter()
            .find(|s| s.identifier == event.identifier)
            .map_or(event.identifier.as_str(), |s| s.display_name.as_str());
        println!(
            "! {} {}: {:+.2}% -> {:+.2}%",
            name, event.kind, event.previous_percent, event.current_percent
        );
    }
}

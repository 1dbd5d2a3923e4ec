//! Fixed-interval quote polling.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use ticker_core::traits::QuoteFeed;
use ticker_core::types::{Instrument, MoveEvent, QuoteMap, SessionSnapshot};
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::session::SessionTracker;

/// Result of one poll tick.
#[derive(Debug, Clone)]
pub struct PollUpdate {
    pub at: DateTime<Local>,
    /// Quotes received this tick; empty when the fetch failed
    pub quotes: QuoteMap,
    /// Notable moves detected this tick
    pub events: Vec<MoveEvent>,
    /// Extrema after this tick, ready to persist
    pub session: SessionSnapshot,
}

/// Polls a quote feed for the watchlist and tracks session moves.
pub struct QuotePoller {
    feed: Arc<dyn QuoteFeed>,
    instruments: Vec<Instrument>,
    tracker: SessionTracker,
    period: Duration,
}

impl QuotePoller {
    pub fn new(
        feed: Arc<dyn QuoteFeed>,
        instruments: Vec<Instrument>,
        tracker: SessionTracker,
        period: Duration,
    ) -> Self {
        Self {
            feed,
            instruments,
            tracker,
            period,
        }
    }

    /// Fetch one batch and run it through the tracker. A fetch that fails
    /// or outlasts the poll period yields an empty tick.
    pub async fn tick(&mut self) -> PollUpdate {
        let at = Local::now();

        let fetch = self.feed.fetch_quotes(&self.instruments);
        let quotes = match timeout(self.period, fetch).await {
            Ok(Ok(quotes)) => quotes,
            Ok(Err(e)) => {
                warn!(feed = self.feed.name(), error = %e, "Quote fetch failed, skipping tick");
                QuoteMap::new()
            }
            Err(_) => {
                warn!(
                    feed = self.feed.name(),
                    period_ms = self.period.as_millis() as u64,
                    "Quote fetch overran the poll period, skipping tick"
                );
                QuoteMap::new()
            }
        };

        let events = self.tracker.observe_batch_at(at.date_naive(), &quotes);
        debug!(
            quotes = quotes.len(),
            events = events.len(),
            "Poll tick complete"
        );

        PollUpdate {
            at,
            quotes,
            events,
            session: self.tracker.snapshot(),
        }
    }

    /// Poll until the receiving side of `tx` is dropped, then hand the
    /// tracker back. A pending wait or fetch is abandoned at that point.
    pub async fn run(mut self, tx: mpsc::Sender<PollUpdate>) -> SessionTracker {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            instruments = self.instruments.len(),
            period_ms = self.period.as_millis() as u64,
            feed = self.feed.name(),
            "Quote poller started"
        );

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                _ = ticker.tick() => {}
            }

            let update = tokio::select! {
                _ = tx.closed() => break,
                update = self.tick() => update,
            };

            if tx.send(update).await.is_err() {
                break;
            }
        }

        info!("Quote poller stopped");
        self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ticker_core::error::FeedError;
    use ticker_core::types::{MoveKind, Quote};

    /// Replays a fixed sequence of percents for one instrument, then fails.
    struct ScriptedFeed {
        percents: Vec<f64>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteFeed for ScriptedFeed {
        async fn fetch_quotes(&self, instruments: &[Instrument]) -> Result<QuoteMap, FeedError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let Some(pct) = self.percents.get(n) else {
                return Err(FeedError::Connection("script exhausted".into()));
            };

            Ok(instruments
                .iter()
                .map(|i| {
                    (
                        i.identifier.clone(),
                        Quote::new(i.identifier.clone(), 10.0, *pct),
                    )
                })
                .collect())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    /// Never answers within any reasonable poll period.
    struct StalledFeed;

    #[async_trait]
    impl QuoteFeed for StalledFeed {
        async fn fetch_quotes(&self, _instruments: &[Instrument]) -> Result<QuoteMap, FeedError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(QuoteMap::new())
        }

        fn name(&self) -> &str {
            "stalled"
        }
    }

    fn stalled_poller(period: Duration) -> QuotePoller {
        QuotePoller::new(
            Arc::new(StalledFeed),
            vec![Instrument::new("sh000001", "Index")],
            SessionTracker::default(),
            period,
        )
    }

    fn poller(percents: Vec<f64>) -> QuotePoller {
        let feed = Arc::new(ScriptedFeed {
            percents,
            calls: AtomicUsize::new(0),
        });
        QuotePoller::new(
            feed,
            vec![Instrument::new("sh000001", "Index")],
            SessionTracker::default(),
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn test_tick_tracks_moves() {
        let mut poller = poller(vec![0.4, -0.2]);

        let first = poller.tick().await;
        assert_eq!(first.quotes.len(), 1);
        assert!(first.events.is_empty());

        let second = poller.tick().await;
        assert_eq!(second.events.len(), 1);
        assert_eq!(second.events[0].kind, MoveKind::SignFlip);
        assert_eq!(second.session.extrema["sh000001"], 0.4);
    }

    #[tokio::test]
    async fn test_failed_tick_is_empty() {
        let mut poller = poller(vec![]);
        let update = poller.tick().await;

        assert!(update.quotes.is_empty());
        assert!(update.events.is_empty());
    }

    #[tokio::test]
    async fn test_slow_feed_does_not_hold_up_ticks() {
        let poller = stalled_poller(Duration::from_millis(50));
        let (tx, mut rx) = mpsc::channel(1);
        let handle = tokio::spawn(poller.run(tx));

        let updates = timeout(Duration::from_secs(2), async {
            let mut updates = Vec::new();
            for _ in 0..4 {
                updates.push(rx.recv().await.unwrap());
            }
            updates
        })
        .await
        .expect("ticks must keep coming while the feed hangs");

        assert!(updates.iter().all(|u| u.quotes.is_empty() && u.events.is_empty()));

        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropping_receiver_abandons_pending_fetch() {
        let poller = stalled_poller(Duration::from_secs(30));
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(poller.run(tx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(rx);

        let tracker = timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller must stop without waiting for the fetch")
            .unwrap();
        assert_eq!(tracker.max_abs_change("sh000001"), None);
    }

    #[tokio::test]
    async fn test_run_stops_when_receiver_dropped() {
        let poller = poller(vec![0.5, 1.5, 2.5]);
        let (tx, mut rx) = mpsc::channel(1);
        let handle = tokio::spawn(poller.run(tx));

        let mut seen = Vec::new();
        for _ in 0..3 {
            let update = rx.recv().await.unwrap();
            seen.push(update.events.len());
        }
        drop(rx);

        let tracker = handle.await.unwrap();
        assert_eq!(seen, vec![0, 1, 1]);
        assert_eq!(tracker.max_abs_change("sh000001"), Some(2.5));
    }
}

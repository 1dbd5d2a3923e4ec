//! Upstream feed trait definitions.

use crate::error::FeedError;
use crate::types::{Bar, Instrument, QuoteMap};
use async_trait::async_trait;

/// Trait for batch quote sources.
#[async_trait]
pub trait QuoteFeed: Send + Sync {
    /// Fetch the latest quotes for a batch of instruments.
    ///
    /// # Arguments
    /// * `instruments` - Instruments to query, in any mix of dialects
    ///
    /// # Returns
    /// Quotes keyed by the requested identifier. Instruments the upstream did
    /// not answer for are simply missing from the map.
    async fn fetch_quotes(&self, instruments: &[Instrument]) -> Result<QuoteMap, FeedError>;

    /// Get the feed name.
    fn name(&self) -> &str;
}

/// Trait for historical daily bar sources.
#[async_trait]
pub trait BarFeed: Send + Sync {
    /// Fetch up to `days` daily bars for an instrument.
    ///
    /// # Returns
    /// Bars ordered from oldest to newest, empty when the upstream has none
    async fn fetch_bars(&self, identifier: &str, days: usize) -> Result<Vec<Bar>, FeedError>;

    /// Get the feed name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quote;

    struct FixedFeed;

    #[async_trait]
    impl QuoteFeed for FixedFeed {
        async fn fetch_quotes(&self, instruments: &[Instrument]) -> Result<QuoteMap, FeedError> {
            Ok(instruments
                .iter()
                .map(|i| (i.identifier.clone(), Quote::new(&i.identifier, 1.0, 0.0)))
                .collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_quote_feed_is_object_safe() {
        let feed: Box<dyn QuoteFeed> = Box::new(FixedFeed);
        let quotes = feed
            .fetch_quotes(&[Instrument::new("sh000001", "Index")])
            .await
            .unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(feed.name(), "fixed");
    }
}

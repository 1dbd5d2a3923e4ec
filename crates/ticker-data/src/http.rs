//! HTTP quote and bar feed.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{header, Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ticker_core::error::FeedError;
use ticker_core::traits::{BarFeed, QuoteFeed};
use ticker_core::types::{Bar, Instrument, QuoteMap};
use tracing::{debug, warn};

use crate::bars::parse_bars;
use crate::parser::parse_batch;
use crate::router::{Dialect, QueryBatch, QuoteSourceRouter};

/// Upstream endpoints and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedEndpoints {
    /// General dialect quote endpoint, codes are appended
    pub general_url: String,
    /// Commodity and futures quote endpoint, codes are appended
    pub sina_url: String,
    /// Referer the commodity/futures host insists on
    pub sina_referer: String,
    /// Historical daily bar endpoint
    pub bar_url: String,
    /// Per-request timeout
    pub timeout_ms: u64,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            general_url: "http://qt.gtimg.cn/q=".to_string(),
            sina_url: "http://hq.sinajs.cn/list=".to_string(),
            sina_referer: "https://finance.sina.com.cn".to_string(),
            bar_url: "http://web.ifzq.gtimg.cn/appstock/app/fqkline/get".to_string(),
            timeout_ms: 2_000,
        }
    }
}

/// Quote and bar client over the public HTTP endpoints.
pub struct HttpFeed {
    endpoints: FeedEndpoints,
    router: QuoteSourceRouter,
    client: Client,
}

impl HttpFeed {
    /// Create a new feed client.
    pub fn new(endpoints: FeedEndpoints) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(endpoints.timeout_ms))
            .build()
            .map_err(|e| FeedError::Connection(e.to_string()))?;

        Ok(Self {
            endpoints,
            router: QuoteSourceRouter::new(),
            client,
        })
    }

    fn batch_request(&self, batch: &QueryBatch) -> RequestBuilder {
        match batch.dialect {
            Dialect::General => self
                .client
                .get(format!("{}{}", self.endpoints.general_url, batch.query())),
            Dialect::CommoditySpot | Dialect::Futures => self
                .client
                .get(format!("{}{}", self.endpoints.sina_url, batch.query()))
                .header(header::REFERER, &self.endpoints.sina_referer),
        }
    }

    async fn fetch_batch(&self, batch: &QueryBatch) -> Result<QuoteMap, FeedError> {
        let body = self.send(self.batch_request(batch)).await?;
        let quotes = parse_batch(&body, batch);

        debug!(
            dialect = %batch.dialect,
            requested = batch.codes.len(),
            parsed = quotes.len(),
            "Fetched quote batch"
        );

        Ok(quotes)
    }

    /// Send a request and decode the body. Both upstreams serve GBK unless
    /// the response says otherwise.
    async fn send(&self, request: RequestBuilder) -> Result<String, FeedError> {
        let resp = request.send().await.map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            return Err(FeedError::Status {
                status: resp.status().as_u16(),
                url: resp.url().to_string(),
            });
        }

        resp.text_with_charset("gbk")
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> FeedError {
        if e.is_timeout() {
            FeedError::Timeout {
                timeout_ms: self.endpoints.timeout_ms,
            }
        } else {
            FeedError::Connection(e.to_string())
        }
    }
}

/// Merge per-dialect results. Failed batches are logged and skipped; the
/// first error is returned only when no batch succeeded.
fn merge_batches(
    results: impl IntoIterator<Item = (Dialect, Result<QuoteMap, FeedError>)>,
) -> Result<QuoteMap, FeedError> {
    let mut quotes = QuoteMap::new();
    let mut first_error = None;
    let mut succeeded = 0;

    for (dialect, result) in results {
        match result {
            Ok(batch_quotes) => {
                succeeded += 1;
                quotes.extend(batch_quotes);
            }
            Err(e) => {
                warn!(%dialect, error = %e, "Quote batch failed");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if succeeded == 0 => Err(e),
        _ => Ok(quotes),
    }
}

#[async_trait]
impl QuoteFeed for HttpFeed {
    async fn fetch_quotes(&self, instruments: &[Instrument]) -> Result<QuoteMap, FeedError> {
        let batches = self.router.plan(instruments);
        if batches.is_empty() {
            return Ok(QuoteMap::new());
        }

        let results = join_all(batches.iter().map(|b| self.fetch_batch(b))).await;
        merge_batches(batches.iter().map(|b| b.dialect).zip(results))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[async_trait]
impl BarFeed for HttpFeed {
    async fn fetch_bars(&self, identifier: &str, days: usize) -> Result<Vec<Bar>, FeedError> {
        let route = self.router.route(identifier);
        if route.dialect != Dialect::General {
            debug!(identifier, dialect = %route.dialect, "No daily bars for dialect");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}?param={},day,,,{},qfq",
            self.endpoints.bar_url, route.query_code, days
        );
        let body = self.send(self.client.get(url)).await?;
        let bars = parse_bars(&body, &route.query_code);

        debug!(identifier, bars = bars.len(), "Fetched daily bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_core::types::Quote;

    #[test]
    fn test_default_endpoints() {
        let endpoints = FeedEndpoints::default();
        assert_eq!(endpoints.timeout_ms, 2_000);
        assert!(endpoints.general_url.ends_with("q="));
    }

    #[test]
    fn test_sina_batches_carry_referer() {
        let feed = HttpFeed::new(FeedEndpoints::default()).unwrap();
        let batches = feed.router.plan(&[
            Instrument::new("sh000001", "Index"),
            Instrument::new("nf_AU0", "Gold"),
        ]);

        let general = feed.batch_request(&batches[0]).build().unwrap();
        assert_eq!(general.url().as_str(), "http://qt.gtimg.cn/q=sh000001");
        assert!(general.headers().get(header::REFERER).is_none());

        let futures = feed.batch_request(&batches[1]).build().unwrap();
        assert_eq!(futures.url().as_str(), "http://hq.sinajs.cn/list=nf_AU0");
        assert_eq!(
            futures.headers().get(header::REFERER).unwrap(),
            "https://finance.sina.com.cn"
        );
    }

    fn quotes(codes: &[&str]) -> QuoteMap {
        codes
            .iter()
            .map(|c| (c.to_string(), Quote::new(*c, 1.0, 0.5)))
            .collect()
    }

    #[test]
    fn test_partial_batch_failure_keeps_other_quotes() {
        let merged = merge_batches(vec![
            (Dialect::General, Ok(quotes(&["sh000001", "sh000832"]))),
            (Dialect::CommoditySpot, Err(FeedError::Timeout { timeout_ms: 2_000 })),
            (Dialect::Futures, Ok(quotes(&["nf_AU0"]))),
        ])
        .unwrap();

        assert_eq!(merged.len(), 3);
        assert!(merged.contains_key("nf_AU0"));
        assert!(!merged.contains_key("gds_AUTD"));
    }

    #[test]
    fn test_all_batches_failed_returns_first_error() {
        let err = merge_batches(vec![
            (Dialect::General, Err(FeedError::Connection("refused".into()))),
            (Dialect::Futures, Err(FeedError::Timeout { timeout_ms: 2_000 })),
        ])
        .unwrap_err();

        assert!(matches!(err, FeedError::Connection(_)));
    }

    #[test]
    fn test_empty_batch_success_is_not_an_error() {
        let merged = merge_batches(vec![
            (Dialect::General, Ok(QuoteMap::new())),
            (Dialect::Futures, Err(FeedError::Connection("refused".into()))),
        ])
        .unwrap();

        assert!(merged.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let endpoints = FeedEndpoints {
            general_url: "http://127.0.0.1:9/q=".to_string(),
            timeout_ms: 200,
            ..FeedEndpoints::default()
        };
        let feed = HttpFeed::new(endpoints).unwrap();
        let result = feed
            .fetch_quotes(&[Instrument::new("sh000001", "Index")])
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_instruments_no_request() {
        let feed = HttpFeed::new(FeedEndpoints::default()).unwrap();
        assert!(feed.fetch_quotes(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bars_skip_non_general_dialects() {
        let feed = HttpFeed::new(FeedEndpoints::default()).unwrap();
        assert!(feed.fetch_bars("nf_AU0", 100).await.unwrap().is_empty());
    }
}

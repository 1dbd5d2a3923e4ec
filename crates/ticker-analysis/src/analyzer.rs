//! On-demand analysis pipeline: bars, indicators, score.

use serde::Serialize;
use std::sync::Arc;
use ticker_core::traits::BarFeed;
use ticker_core::types::{Bar, BarSeries, IndicatorSet, Instrument, ScoreResult};
use ticker_indicators::IndicatorEngine;
use tracing::{info, warn};

use crate::scoring::ScoringEngine;

/// Scored view of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Price scored against the indicators
    pub price: f64,
    /// Close of the bar before the latest one
    pub prior_close: f64,
    pub indicators: IndicatorSet,
    pub score: ScoreResult,
}

/// Result of analysing one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub instrument: Instrument,
    /// Number of bars the indicators were computed from
    pub bar_count: usize,
    /// `None` when fewer than two bars were available
    pub assessment: Option<Assessment>,
}

/// Runs the bar feed, indicator engine and scoring engine for one instrument
/// at a time.
pub struct Analyzer {
    feed: Arc<dyn BarFeed>,
    engine: IndicatorEngine,
    scorer: ScoringEngine,
    bar_days: usize,
}

impl Analyzer {
    /// Create an analyzer fetching `bar_days` daily bars per run.
    pub fn new(feed: Arc<dyn BarFeed>, bar_days: usize) -> Self {
        Self {
            feed,
            engine: IndicatorEngine::new(),
            scorer: ScoringEngine::new(),
            bar_days,
        }
    }

    /// Fetch bars and analyse.
    ///
    /// A feed failure is logged and reported as "no data". `live_price`, when
    /// given, replaces the last close as the scored price.
    pub async fn analyze(&self, instrument: &Instrument, live_price: Option<f64>) -> AnalysisReport {
        let bars = match self
            .feed
            .fetch_bars(&instrument.identifier, self.bar_days)
            .await
        {
            Ok(bars) => bars,
            Err(e) => {
                warn!(
                    identifier = %instrument.identifier,
                    feed = self.feed.name(),
                    error = %e,
                    "Bar fetch failed"
                );
                Vec::new()
            }
        };

        self.analyze_bars(instrument, bars, live_price)
    }

    /// Analyse an already fetched bar sequence.
    pub fn analyze_bars(
        &self,
        instrument: &Instrument,
        bars: Vec<Bar>,
        live_price: Option<f64>,
    ) -> AnalysisReport {
        let series = BarSeries::new(instrument.identifier.clone(), bars);
        let bar_count = series.len();

        let (Some(last), Some(previous)) = (series.last(), series.previous()) else {
            info!(identifier = %instrument.identifier, bar_count, "Not enough bars to analyse");
            return AnalysisReport {
                instrument: instrument.clone(),
                bar_count,
                assessment: None,
            };
        };

        let price = live_price.unwrap_or(last.close);
        let prior_close = previous.close;
        let indicators = self.engine.compute(&series);
        let score = self.scorer.score(price, prior_close, &indicators);

        info!(
            identifier = %instrument.identifier,
            score = score.score,
            conclusion = %score.conclusion,
            "Analysis complete"
        );

        AnalysisReport {
            instrument: instrument.clone(),
            bar_count,
            assessment: Some(Assessment {
                price,
                prior_close,
                indicators,
                score,
            }),
        }
    }
}

//! Heuristic scoring over an indicator snapshot.
//!
//! Four independent rule groups (trend, momentum, volume, sentiment) each add
//! fixed deltas to a running score. A rule whose inputs are absent
//! contributes nothing. The final score is bucketed into a [`Conclusion`].

use ticker_core::types::{
    Conclusion, IndicatorSet, ScoreResult, SentimentLabel, TrendLabel, VolumeLabel,
};

/// Score at or above which the conclusion is [`Conclusion::StrongBuy`].
pub const STRONG_BUY_THRESHOLD: f64 = 2.5;
/// Score at or above which the conclusion is [`Conclusion::Accumulate`].
pub const ACCUMULATE_THRESHOLD: f64 = 1.0;
/// Score at or below which the conclusion is [`Conclusion::Reduce`].
pub const REDUCE_THRESHOLD: f64 = -1.5;
/// Score at or below which the conclusion is [`Conclusion::Watch`].
pub const WATCH_THRESHOLD: f64 = 0.0;

/// Volume ratio above which volume is expanding.
pub const VOLUME_EXPANDING: f64 = 1.5;
/// Volume ratio below which volume is contracting.
pub const VOLUME_CONTRACTING: f64 = 0.6;

/// RSI above which sentiment is overbought.
pub const RSI_OVERBOUGHT: f64 = 80.0;
/// RSI below which sentiment is oversold.
pub const RSI_OVERSOLD: f64 = 20.0;

const KDJ_LOW: f64 = 20.0;
const KDJ_HIGH: f64 = 80.0;

/// Combines price and indicators into a [`ScoreResult`].
///
/// Stateless; identical inputs always give an identical result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    /// Create a new scoring engine.
    pub fn new() -> Self {
        Self
    }

    /// Score `price` against `prior_close` and the indicator snapshot.
    pub fn score(&self, price: f64, prior_close: f64, indicators: &IndicatorSet) -> ScoreResult {
        let score = trend_score(price, indicators)
            + momentum_score(indicators)
            + volume_score(price, prior_close, indicators)
            + sentiment_score(indicators);

        ScoreResult {
            score,
            conclusion: conclude(score),
            trend_label: trend_label(price, indicators),
            volume_label: volume_label(indicators.volume_ratio),
            sentiment_label: sentiment_label(indicators.rsi14),
        }
    }
}

/// Bucket a score.
pub fn conclude(score: f64) -> Conclusion {
    if score >= STRONG_BUY_THRESHOLD {
        Conclusion::StrongBuy
    } else if score >= ACCUMULATE_THRESHOLD {
        Conclusion::Accumulate
    } else if score <= REDUCE_THRESHOLD {
        Conclusion::Reduce
    } else if score <= WATCH_THRESHOLD {
        Conclusion::Watch
    } else {
        Conclusion::Hold
    }
}

fn trend_score(price: f64, ind: &IndicatorSet) -> f64 {
    let mut score = 0.0;

    if let Some(ma20) = ind.ma20 {
        score += if price > ma20 { 1.0 } else { -0.5 };

        if let Some(ma5) = ind.ma5 {
            if ma5 > ma20 {
                score += 0.5;
            } else if ma5 < ma20 {
                score -= 0.5;
            }
        }
    }

    if let Some(ma60) = ind.ma60 {
        if price > ma60 {
            score += 0.5;
        } else if price < ma60 {
            score -= 0.5;
        }
    }

    score
}

fn momentum_score(ind: &IndicatorSet) -> f64 {
    let mut score = 0.0;

    if let Some(macd) = ind.macd {
        if macd.dif > macd.dea {
            score += 0.5;
        } else if macd.dif < macd.dea {
            score -= 0.5;
        }

        if macd.dif > 0.0 && macd.dea > 0.0 {
            score += 0.5;
        } else if macd.dif < 0.0 && macd.dea < 0.0 {
            score -= 0.5;
        }

        if macd.bar > 0.0 && macd.bar > macd.prev_bar {
            score += 0.5;
        } else if macd.bar < 0.0 && macd.bar < macd.prev_bar {
            score -= 0.5;
        }
    }

    if let Some(kdj) = ind.kdj {
        if kdj.j < 0.0 || (kdj.k < KDJ_LOW && kdj.d < KDJ_LOW) {
            score += 0.5;
        } else if kdj.j > 100.0 || (kdj.k > KDJ_HIGH && kdj.d > KDJ_HIGH) {
            score -= 0.5;
        }
    }

    score
}

fn volume_score(price: f64, prior_close: f64, ind: &IndicatorSet) -> f64 {
    let Some(ratio) = ind.volume_ratio else {
        return 0.0;
    };

    if ratio > VOLUME_EXPANDING {
        if price > prior_close {
            return 1.0;
        }
        if price < prior_close {
            return -1.0;
        }
    } else if ratio < VOLUME_CONTRACTING && price > prior_close {
        return 0.5;
    }

    0.0
}

fn sentiment_score(ind: &IndicatorSet) -> f64 {
    match ind.rsi14 {
        Some(rsi) if rsi < RSI_OVERSOLD => 1.0,
        Some(rsi) if rsi > RSI_OVERBOUGHT => -1.0,
        _ => 0.0,
    }
}

fn trend_label(price: f64, ind: &IndicatorSet) -> TrendLabel {
    let Some(ma20) = ind.ma20 else {
        return TrendLabel::Unknown;
    };

    match ind.ma5 {
        Some(ma5) if price > ma20 && ma5 > ma20 => TrendLabel::Bullish,
        Some(ma5) if price < ma20 && ma5 < ma20 => TrendLabel::Bearish,
        _ => TrendLabel::Mixed,
    }
}

fn volume_label(ratio: Option<f64>) -> VolumeLabel {
    match ratio {
        None => VolumeLabel::Unknown,
        Some(r) if r > VOLUME_EXPANDING => VolumeLabel::Expanding,
        Some(r) if r < VOLUME_CONTRACTING => VolumeLabel::Contracting,
        Some(_) => VolumeLabel::Steady,
    }
}

fn sentiment_label(rsi: Option<f64>) -> SentimentLabel {
    match rsi {
        None => SentimentLabel::Unknown,
        Some(r) if r > RSI_OVERBOUGHT => SentimentLabel::Overbought,
        Some(r) if r < RSI_OVERSOLD => SentimentLabel::Oversold,
        Some(_) => SentimentLabel::Neutral,
    }
}

//! Indicator snapshot and score types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    /// Fast EMA minus slow EMA
    pub dif: f64,
    /// Signal line (EMA of DIF)
    pub dea: f64,
    /// Histogram, (DIF - DEA) * 2
    pub bar: f64,
    /// Histogram of the previous point
    pub prev_bar: f64,
}

/// Latest KDJ reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdjValue {
    pub k: f64,
    pub d: f64,
    /// 3K - 2D, not clamped
    pub j: f64,
}

/// All indicators computed from one bar snapshot.
///
/// Each field is `None` when there were not enough bars for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub macd: Option<MacdValue>,
    pub rsi14: Option<f64>,
    pub kdj: Option<KdjValue>,
    /// Latest volume over the mean of the five preceding volumes
    pub volume_ratio: Option<f64>,
}

/// Final recommendation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conclusion {
    StrongBuy,
    Accumulate,
    Hold,
    Watch,
    Reduce,
}

impl Conclusion {
    /// One-line advisory text.
    pub fn advice(&self) -> &'static str {
        match self {
            Conclusion::StrongBuy => "Strong buy. Indicators are aligned to the upside.",
            Conclusion::Accumulate => "Hold / accumulate. Technicals lean strong.",
            Conclusion::Hold => "Hold. Signals are mixed, wait for a clearer direction.",
            Conclusion::Watch => "Watch. Technicals lean weak, stay on the sidelines.",
            Conclusion::Reduce => "Reduce. Indicators are aligned to the downside.",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Conclusion::StrongBuy => "Strong Buy",
            Conclusion::Accumulate => "Accumulate",
            Conclusion::Hold => "Hold",
            Conclusion::Watch => "Watch",
            Conclusion::Reduce => "Reduce",
        };
        f.write_str(s)
    }
}

/// Price trend relative to the moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    Bullish,
    Bearish,
    Mixed,
    Unknown,
}

/// Volume relative to the recent average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLabel {
    Expanding,
    Contracting,
    Steady,
    Unknown,
}

/// RSI sentiment zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Overbought,
    Oversold,
    Neutral,
    Unknown,
}

macro_rules! label_display {
    ($ty:ty { $($variant:ident => $text:expr),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($text)),+
                }
            }
        }
    };
}

label_display!(TrendLabel {
    Bullish => "bullish",
    Bearish => "bearish",
    Mixed => "mixed",
    Unknown => "unknown",
});

label_display!(VolumeLabel {
    Expanding => "expanding",
    Contracting => "contracting",
    Steady => "steady",
    Unknown => "unknown",
});

label_display!(SentimentLabel {
    Overbought => "overbought",
    Oversold => "oversold",
    Neutral => "neutral",
    Unknown => "unknown",
});

/// Output of the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub conclusion: Conclusion,
    pub trend_label: TrendLabel,
    pub volume_label: VolumeLabel,
    pub sentiment_label: SentimentLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_indicator_set_is_all_absent() {
        let set = IndicatorSet::default();
        assert!(set.ma5.is_none());
        assert!(set.macd.is_none());
        assert!(set.kdj.is_none());
        assert!(set.volume_ratio.is_none());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(TrendLabel::Bullish.to_string(), "bullish");
        assert_eq!(VolumeLabel::Contracting.to_string(), "contracting");
        assert_eq!(SentimentLabel::Oversold.to_string(), "oversold");
        assert_eq!(Conclusion::StrongBuy.to_string(), "Strong Buy");
    }
}

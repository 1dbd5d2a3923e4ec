//! OHLCV (Open, High, Low, Close, Volume) data types.

use serde::{Deserialize, Serialize};

/// One daily bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day as delivered upstream (YYYY-MM-DD)
    pub date: String,
    /// Opening price
    pub open: f64,
    /// Closing price
    pub close: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar. Argument order follows the upstream row layout.
    pub fn new(
        date: impl Into<String>,
        open: f64,
        close: f64,
        high: f64,
        low: f64,
        volume: f64,
    ) -> Self {
        Self {
            date: date.into(),
            open,
            close,
            high,
            low,
            volume,
        }
    }
}

/// Ordered daily bars for one instrument, oldest first.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    /// Instrument identifier
    pub symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Create a series from bars already ordered oldest to newest.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get the bar before the last one.
    pub fn previous(&self) -> Option<&Bar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

}

impl FromIterator<Bar> for BarSeries {
    fn from_iter<T: IntoIterator<Item = Bar>>(iter: T) -> Self {
        Self {
            symbol: String::new(),
            bars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_series_extractions() {
        let series = BarSeries::new(
            "sh000001",
            vec![
                Bar::new("2024-01-02", 100.0, 100.5, 101.0, 99.0, 1000.0),
                Bar::new("2024-01-03", 100.5, 101.5, 102.0, 100.0, 2000.0),
            ],
        );

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.volumes(), vec![1000.0, 2000.0]);
        assert_eq!(series.highs(), vec![101.0, 102.0]);
        assert_eq!(series.lows(), vec![99.0, 100.0]);
        assert_eq!(series.previous().unwrap().date, "2024-01-02");
        assert_eq!(series.last().unwrap().date, "2024-01-03");
    }

    #[test]
    fn test_bar_series_from_iter() {
        let series: BarSeries = (0..5)
            .map(|i| Bar::new(format!("2024-01-0{}", i + 1), 1.0, i as f64, 1.0, 1.0, 0.0))
            .collect();

        assert_eq!(series.len(), 5);
        assert_eq!(series.previous().unwrap().close, 3.0);
        assert!(series.symbol.is_empty());
        assert!(BarSeries::default().previous().is_none());
    }
}

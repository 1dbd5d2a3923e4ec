//! Indicator engine.
//!
//! Computes the full [`IndicatorSet`] from one bar snapshot. Every indicator
//! is independent: a short series leaves the long-window fields absent while
//! the short-window ones are still filled in.

use ticker_core::traits::{HlcIndicator, Indicator};
use ticker_core::types::{Bar, BarSeries, IndicatorSet, KdjValue, MacdValue};
use tracing::debug;

use crate::momentum::{Kdj, Macd, Rsi};
use crate::moving_average::Sma;
use crate::volume::VolumeRatio;

/// Computes MA(5/20/60), RSI(14), MACD(12,26,9), KDJ(9,3,3) and the volume
/// ratio.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    ma5: Sma,
    ma20: Sma,
    ma60: Sma,
    rsi: Rsi,
    macd: Macd,
    kdj: Kdj,
    volume_ratio: VolumeRatio,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self {
            ma5: Sma::new(5),
            ma20: Sma::new(20),
            ma60: Sma::new(60),
            rsi: Rsi::new(14),
            macd: Macd::new(),
            kdj: Kdj::new(),
            volume_ratio: VolumeRatio::default(),
        }
    }

    /// Compute every indicator from a bar series.
    pub fn compute(&self, series: &BarSeries) -> IndicatorSet {
        let closes = series.closes();

        let macd = self.macd.calculate(&closes);
        let macd = match macd.as_slice() {
            [.., prev, last] => Some(MacdValue {
                dif: last.dif,
                dea: last.dea,
                bar: last.bar,
                prev_bar: prev.bar,
            }),
            _ => None,
        };

        let kdj = self
            .kdj
            .calculate(&series.highs(), &series.lows(), &closes)
            .pop()
            .map(|o| KdjValue {
                k: o.k,
                d: o.d,
                j: o.j,
            });

        let set = IndicatorSet {
            ma5: self.ma5.latest(&closes),
            ma20: self.ma20.latest(&closes),
            ma60: self.ma60.latest(&closes),
            macd,
            rsi14: self.rsi.latest(&closes),
            kdj,
            volume_ratio: self.volume_ratio.latest(&series.volumes()).flatten(),
        };

        debug!(
            symbol = %series.symbol,
            bars = series.len(),
            ma20 = ?set.ma20,
            rsi14 = ?set.rsi14,
            "Computed indicators"
        );

        set
    }

    /// Compute every indicator from a plain bar slice.
    pub fn compute_bars(&self, bars: &[Bar]) -> IndicatorSet {
        self.compute(&BarSeries::new("", bars.to_vec()))
    }
}

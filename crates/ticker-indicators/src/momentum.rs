//! Momentum indicators.

use serde::{Deserialize, Serialize};
use ticker_core::traits::{HlcIndicator, Indicator};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Uses a simple average of the last `period` gains and losses instead of
/// Wilder's smoothing, so values differ slightly from most charting tools.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // Calculate price changes over the whole series
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for i in 1..data.len() {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period_f64 = self.period as f64;
        gains
            .windows(self.period)
            .zip(losses.windows(self.period))
            .map(|(g, l)| {
                let avg_gain = g.iter().sum::<f64>() / period_f64;
                let avg_loss = l.iter().sum::<f64>() / period_f64;
                if avg_loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA
    pub dif: f64,
    /// Signal line (EMA of DIF)
    pub dea: f64,
    /// Histogram, (DIF - DEA) * 2
    pub bar: f64,
}

/// MACD indicator.
///
/// All three EMAs are seeded with the first value of their input, which
/// makes early points approximate; the minimum length of `slow + signal`
/// keeps the tail usable.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.len() < self.period() {
            return vec![];
        }

        let fast_ema = self.fast.calculate(data);
        let slow_ema = self.slow.calculate(data);

        let dif_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let dea_line = self.signal.calculate(&dif_line);

        dif_line
            .iter()
            .zip(dea_line.iter())
            .map(|(&dif, &dea)| MacdOutput {
                dif,
                dea,
                bar: (dif - dea) * 2.0,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow.span() + self.signal.span()
    }
}

/// KDJ output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdjOutput {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

/// KDJ stochastic oscillator.
///
/// K and D start at 50 and are smoothed with weights `(m-1)/m` and `1/m`.
/// Only the last `lookback` bars are walked; older bars have decayed out of
/// the tail.
#[derive(Debug, Clone)]
pub struct Kdj {
    window: usize,
    k_smooth: usize,
    d_smooth: usize,
    lookback: usize,
}

impl Kdj {
    /// Seed value of K and D.
    pub const SEED: f64 = 50.0;

    /// Create a new KDJ with default parameters (9, 3, 3).
    pub fn new() -> Self {
        Self::with_periods(9, 3, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(window: usize, k_smooth: usize, d_smooth: usize) -> Self {
        assert!(window > 0 && k_smooth > 0 && d_smooth > 0);
        Self {
            window,
            k_smooth,
            d_smooth,
            lookback: 100,
        }
    }

}

impl Default for Kdj {
    fn default() -> Self {
        Self::new()
    }
}

impl HlcIndicator for Kdj {
    type Output = KdjOutput;

    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<KdjOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.window {
            return vec![];
        }

        let start = len.saturating_sub(self.lookback);
        let (high, low, close) = (&high[start..len], &low[start..len], &close[start..len]);

        let k_smooth = self.k_smooth as f64;
        let d_smooth = self.d_smooth as f64;
        let mut k = Self::SEED;
        let mut d = Self::SEED;
        let mut result = Vec::with_capacity(close.len() + 1 - self.window);

        for i in (self.window - 1)..close.len() {
            let from = i + 1 - self.window;
            let highest = high[from..=i]
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = low[from..=i]
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);

            let rsv = if highest == lowest {
                50.0
            } else {
                (close[i] - lowest) / (highest - lowest) * 100.0
            };

            k = (k * (k_smooth - 1.0) + rsv) / k_smooth;
            d = (d * (d_smooth - 1.0) + k) / d_smooth;
            result.push(KdjOutput {
                k,
                d,
                j: 3.0 * k - 2.0 * d,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.window
    }
}

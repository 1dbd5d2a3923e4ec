//! Moving average indicators.

use ticker_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    /// Mean of the last window, shifted by its first value so a flat window
    /// returns that value exactly.
    fn latest(&self, data: &[f64]) -> Option<f64> {
        self.validate_data(data).ok()?;
        let window = &data[data.len() - self.period..];
        let base = window[0];
        let offset: f64 = window.iter().map(|v| v - base).sum();
        Some(base + offset / self.period as f64)
    }
}

/// Exponential Moving Average (EMA).
///
/// Uses `alpha = 2 / (span + 1)` and is seeded with the first value of the
/// series rather than an SMA of the first `span` values, so it yields one
/// output per input.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        let multiplier = 2.0 / (span as f64 + 1.0);
        Self { span, multiplier }
    }

    /// The smoothing span.
    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };

        let mut result = Vec::with_capacity(data.len());
        let mut ema = first;
        result.push(ema);

        let one_minus_mult = 1.0 - self.multiplier;
        for &price in rest {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];

        assert!(sma.calculate(&data).is_empty());
        assert!(sma.latest(&data).is_none());
    }

    #[test]
    fn test_sma_constant_series_is_exact() {
        let data = vec![3.17; 60];
        for period in [5, 20, 60] {
            assert_eq!(Sma::new(period).latest(&data), Some(3.17));
        }
    }

    #[test]
    fn test_ema_seeded_with_first_value() {
        let ema = Ema::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!((result[0] - 1.0).abs() < 1e-10);
        // mult = 2/(3+1) = 0.5
        // result[1] = 2 * 0.5 + 1 * 0.5 = 1.5
        assert!((result[1] - 1.5).abs() < 1e-10);
        // result[2] = 3 * 0.5 + 1.5 * 0.5 = 2.25
        assert!((result[2] - 2.25).abs() < 1e-10);
    }

    #[test]
    fn test_ema_empty() {
        assert!(Ema::new(12).calculate(&[]).is_empty());
        assert!(Ema::new(12).latest(&[]).is_none());
    }
}

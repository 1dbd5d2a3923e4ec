//! Volume indicators.

use ticker_core::traits::Indicator;

/// Volume ratio: each volume over the mean of the `period` volumes before it.
///
/// Windows whose mean is zero produce `None`.
#[derive(Debug, Clone)]
pub struct VolumeRatio {
    period: usize,
}

impl VolumeRatio {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for VolumeRatio {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Indicator for VolumeRatio {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        if data.len() <= self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        data.windows(self.period + 1)
            .map(|w| {
                let (today, prior) = w.split_last()?;
                let mean = prior.iter().sum::<f64>() / period_f64;
                (mean > 0.0).then(|| today / mean)
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1
    }
}

//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators over a single price series.
///
/// Indicators process price data and produce derived values
/// useful for the scoring engine.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closes), oldest first
    ///
    /// # Returns
    /// A vector of indicator values, empty when there is not enough data
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }

    /// Latest value, or `None` when there is not enough data.
    fn latest(&self, data: &[f64]) -> Option<Self::Output> {
        self.validate_data(data).ok()?;
        self.calculate(data).pop()
    }
}

/// Indicator that needs high, low and close series.
pub trait HlcIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from aligned high/low/close series.
    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;
}

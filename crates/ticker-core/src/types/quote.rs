//! Real-time quote snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A quote snapshot for one instrument, produced fresh on every poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier as requested by the caller (never the rewritten query code)
    pub identifier: String,
    /// Last traded price
    pub price: f64,
    /// Change relative to the previous close or settlement, in percent
    pub change_percent: f64,
    /// Traded volume, 0 when the upstream does not report it
    pub volume: f64,
}

/// Quotes of one batch keyed by requested identifier.
pub type QuoteMap = HashMap<String, Quote>;

/// Direction of the day's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Quote {
    /// Create a new quote with unknown volume.
    pub fn new(identifier: impl Into<String>, price: f64, change_percent: f64) -> Self {
        Self {
            identifier: identifier.into(),
            price,
            change_percent,
            volume: 0.0,
        }
    }

    /// Set the traded volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Direction of the change percent.
    pub fn direction(&self) -> Direction {
        if self.change_percent > 0.0 {
            Direction::Up
        } else if self.change_percent < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_direction() {
        assert_eq!(Quote::new("a", 1.0, 0.5).direction(), Direction::Up);
        assert_eq!(Quote::new("a", 1.0, -0.5).direction(), Direction::Down);
        assert_eq!(Quote::new("a", 1.0, 0.0).direction(), Direction::Flat);
        assert_eq!(Quote::new("a", 1.0, -0.0).direction(), Direction::Flat);
    }

    #[test]
    fn test_quote_volume_defaults_to_zero() {
        let quote = Quote::new("sh000001", 3000.0, 0.33);
        assert_eq!(quote.volume, 0.0);
        assert_eq!(quote.with_volume(12.0).volume, 12.0);
    }
}

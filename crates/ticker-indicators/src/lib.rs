//! Technical indicators for daily bar analysis.
//!
//! This crate provides the indicators the scoring engine consumes:
//! - Moving averages (SMA, first-value-seeded EMA)
//! - Momentum indicators (RSI, MACD, KDJ)
//! - Volume ratio
//!
//! [`IndicatorEngine`] bundles them into a single [`IndicatorSet`](ticker_core::IndicatorSet).

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volume;

pub use engine::IndicatorEngine;
pub use momentum::{Kdj, KdjOutput, Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volume::VolumeRatio;

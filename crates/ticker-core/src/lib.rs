//! Core types and traits for the watchlist monitor.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Quote, Bar, BarSeries)
//! - Derived analysis values (IndicatorSet, ScoreResult)
//! - Session move events
//! - Core traits for indicators and upstream feeds

pub mod types;
pub mod traits;
pub mod error;

pub use error::TickerError;
pub use types::*;
pub use traits::*;

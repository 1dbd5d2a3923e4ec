//! Core data types for the watchlist monitor.

mod analysis;
mod event;
mod instrument;
mod ohlcv;
mod quote;

pub use analysis::{
    Conclusion, IndicatorSet, KdjValue, MacdValue, ScoreResult, SentimentLabel, TrendLabel,
    VolumeLabel,
};
pub use event::{MoveEvent, MoveKind, SessionSnapshot, SESSION_DATE_FORMAT};
pub use instrument::Instrument;
pub use ohlcv::{Bar, BarSeries};
pub use quote::{Direction, Quote, QuoteMap};

//! Core traits for the watchlist monitor.

mod feed;
mod indicator;

pub use feed::{BarFeed, QuoteFeed};
pub use indicator::{HlcIndicator, Indicator};

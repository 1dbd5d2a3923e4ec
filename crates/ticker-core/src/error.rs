//! Error types for the watchlist monitor.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum TickerError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Upstream feed errors.
///
/// These never escape a poll tick; the poller logs them and treats the tick
/// as "no data".
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Body decode error: {0}")]
    Decode(String),
}

/// Payload shape errors.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected payload shape: {0}")]
    Shape(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Watchlist file errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed watchlist file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid session date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_converts_to_top_level() {
        let err: TickerError = FeedError::Timeout { timeout_ms: 2000 }.into();
        assert_eq!(
            err.to_string(),
            "Feed error: Request timed out after 2000 ms"
        );
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = IndicatorError::InsufficientData {
            required: 35,
            available: 20,
        };
        assert_eq!(err.to_string(), "Insufficient data: need 35 points, have 20");
    }
}

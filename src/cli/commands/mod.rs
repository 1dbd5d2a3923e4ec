//! CLI command implementations.

pub mod analyze;
pub mod quote;
pub mod validate;
pub mod watch;
pub mod watchlist;

use ticker_config::WatchlistFile;
use ticker_core::types::{Direction, Instrument};

/// Turn command-line codes into instruments, borrowing display names from
/// the watchlist when the code is on it.
pub fn resolve_instruments(symbols: &[String], watchlist: &WatchlistFile) -> Vec<Instrument> {
    symbols
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(|code| {
            watchlist
                .stocks
                .iter()
                .find(|s| s.identifier == code)
                .cloned()
                .unwrap_or_else(|| Instrument::new(code, code))
        })
        .collect()
}

/// Terminal marker for a move direction.
pub fn direction_marker(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Flat => "·",
    }
}

//! One-line quote rendering.

use serde::{Deserialize, Serialize};
use ticker_core::types::{Direction, Instrument, Quote};

/// Named display preferences stored alongside the watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPreferences {
    /// Display names are cut to this many characters
    pub max_name_chars: usize,
    /// Append the traded volume
    pub show_volume: bool,
    /// Surface notable moves to the user
    pub alert_on_moves: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            max_name_chars: 8,
            show_volume: false,
            alert_on_moves: true,
        }
    }
}

/// A rendered watchlist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    pub text: String,
    pub direction: Direction,
}

/// Render one watchlist entry. A missing quote renders as `name --`.
pub fn format_quote_line(
    instrument: &Instrument,
    quote: Option<&Quote>,
    prefs: &DisplayPreferences,
) -> QuoteLine {
    let name: String = instrument
        .display_name
        .chars()
        .take(prefs.max_name_chars)
        .collect();

    let Some(quote) = quote else {
        return QuoteLine {
            text: format!("{name} --"),
            direction: Direction::Flat,
        };
    };

    let mut text = format!("{}  {:+.2}%  {:.2}", name, quote.change_percent, quote.price);
    if prefs.show_volume {
        text.push_str(&format!("  vol {:.0}", quote.volume));
    }

    QuoteLine {
        text,
        direction: quote.direction(),
    }
}

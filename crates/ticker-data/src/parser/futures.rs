//! Futures and forex.
//!
//! `var hq_str_nf_AU0="name,time,open,high,low,prev_close,bid,ask,price,settle,prev_settle,bid_vol,ask_vol,open_interest,volume,..."`

use super::{number, optional_number, percent_change, DialectParser, QuoteFields};
use crate::router::Dialect;

const PREV_CLOSE: usize = 5;
const PRICE: usize = 8;
const VOLUME: usize = 14;

/// Comma-separated futures dialect. No percent field; it is always derived.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuturesParser;

impl DialectParser for FuturesParser {
    fn dialect(&self) -> Dialect {
        Dialect::Futures
    }

    fn variable_prefix(&self) -> &'static str {
        "hq_str_"
    }

    fn separator(&self) -> char {
        ','
    }

    fn min_fields(&self) -> usize {
        PRICE + 1
    }

    fn parse_fields(&self, fields: &[&str]) -> Option<QuoteFields> {
        let price = number(fields, PRICE)?;
        let prior = number(fields, PREV_CLOSE)?;

        Some(QuoteFields {
            price,
            change_percent: percent_change(price, prior)?,
            volume: optional_number(fields, VOLUME),
        })
    }
}

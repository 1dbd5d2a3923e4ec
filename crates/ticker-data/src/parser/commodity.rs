//! Spot commodities.
//!
//! `var hq_str_gds_AUTD="price,percent,bid,ask,high,low,time,prev_close,open,volume,..."`
//! The percent field is empty on some feeds; the change is then derived from
//! the previous close.

use super::{number, optional_number, percent_change, DialectParser, QuoteFields};
use crate::router::Dialect;

const PRICE: usize = 0;
const PERCENT: usize = 1;
const PREV_CLOSE: usize = 7;
const VOLUME: usize = 9;

/// Comma-separated spot commodity dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommoditySpotParser;

impl DialectParser for CommoditySpotParser {
    fn dialect(&self) -> Dialect {
        Dialect::CommoditySpot
    }

    fn variable_prefix(&self) -> &'static str {
        "hq_str_"
    }

    fn separator(&self) -> char {
        ','
    }

    fn min_fields(&self) -> usize {
        PREV_CLOSE + 1
    }

    fn parse_fields(&self, fields: &[&str]) -> Option<QuoteFields> {
        let price = number(fields, PRICE)?;

        let change_percent = match fields.get(PERCENT)?.trim() {
            "" => percent_change(price, number(fields, PREV_CLOSE)?)?,
            _ => number(fields, PERCENT)?,
        };

        Some(QuoteFields {
            price,
            change_percent,
            volume: optional_number(fields, VOLUME),
        })
    }
}

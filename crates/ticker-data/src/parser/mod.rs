//! Quote batch parsers, one per upstream dialect.
//!
//! Every dialect answers with `;`-separated `name="f0<sep>f1<sep>..."`
//! records. The record framing is shared here; each dialect only decides how
//! its fields map onto a [`Quote`].

mod commodity;
mod futures;
mod general;

pub use commodity::CommoditySpotParser;
pub use futures::FuturesParser;
pub use general::GeneralParser;

use ticker_core::types::{Quote, QuoteMap};
use tracing::debug;

use crate::router::{Dialect, QueryBatch};

/// Numeric fields extracted from one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteFields {
    pub price: f64,
    pub change_percent: f64,
    pub volume: f64,
}

/// Field layout of one dialect.
pub trait DialectParser: Send + Sync {
    /// Dialect served by this parser.
    fn dialect(&self) -> Dialect;

    /// Variable-name prefix in front of the queried code.
    fn variable_prefix(&self) -> &'static str;

    /// Field separator inside the quoted value.
    fn separator(&self) -> char;

    /// Records with fewer fields are skipped.
    fn min_fields(&self) -> usize;

    /// Extract the numeric fields; `None` when a required field is malformed.
    fn parse_fields(&self, fields: &[&str]) -> Option<QuoteFields>;
}

/// Parser for a dialect.
pub fn parser_for(dialect: Dialect) -> &'static dyn DialectParser {
    match dialect {
        Dialect::General => &GeneralParser,
        Dialect::CommoditySpot => &CommoditySpotParser,
        Dialect::Futures => &FuturesParser,
    }
}

/// Parse a whole batch payload.
///
/// Malformed records are skipped; an unusable payload yields an empty map.
/// Results are keyed by the identifiers recorded in `batch`.
pub fn parse_batch(payload: &str, batch: &QueryBatch) -> QuoteMap {
    let parser = parser_for(batch.dialect);
    let mut quotes = QuoteMap::new();

    for record in payload.split(';') {
        let record = record.trim();
        if record.is_empty() {
            continue;
        }

        let Some((code, fields)) = split_record(parser, record) else {
            debug!(dialect = %batch.dialect, record, "Skipping unframed record");
            continue;
        };

        if fields.len() < parser.min_fields() {
            debug!(
                dialect = %batch.dialect,
                code,
                fields = fields.len(),
                required = parser.min_fields(),
                "Skipping short record"
            );
            continue;
        }

        let owners = batch.owners(code);
        if owners.is_empty() {
            debug!(dialect = %batch.dialect, code, "Skipping unrequested record");
            continue;
        }

        let Some(parsed) = parser.parse_fields(&fields) else {
            debug!(dialect = %batch.dialect, code, "Skipping record with malformed numbers");
            continue;
        };

        for identifier in owners {
            let quote = Quote::new(identifier.as_str(), parsed.price, parsed.change_percent)
                .with_volume(parsed.volume);
            quotes.insert(identifier.to_string(), quote);
        }
    }

    quotes
}

/// Split `var prefix_code="a~b~c"` into the code and its fields.
fn split_record<'a>(
    parser: &dyn DialectParser,
    record: &'a str,
) -> Option<(&'a str, Vec<&'a str>)> {
    let (name, value) = record.split_once("=\"")?;
    let name = name.trim();
    let name = name.strip_prefix("var ").unwrap_or(name).trim();
    let code = name.strip_prefix(parser.variable_prefix())?;
    if code.is_empty() {
        return None;
    }

    let value = match value.rfind('"') {
        Some(end) => &value[..end],
        None => value,
    };

    Some((code, value.split(parser.separator()).collect()))
}

/// Parse a required numeric field.
pub(crate) fn number(fields: &[&str], index: usize) -> Option<f64> {
    let value: f64 = fields.get(index)?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse an optional numeric field, 0 when missing or malformed.
pub(crate) fn optional_number(fields: &[&str], index: usize) -> f64 {
    number(fields, index).unwrap_or(0.0)
}

/// Percent change against a prior close; `None` when the prior is unusable.
pub(crate) fn percent_change(price: f64, prior: f64) -> Option<f64> {
    if prior == 0.0 {
        return None;
    }
    let percent = (price - prior) / prior * 100.0;
    percent.is_finite().then_some(percent)
}

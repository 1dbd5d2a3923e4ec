//! Equities, funds and indices.
//!
//! `v_sh000001="1~name~000001~price~prev_close~open~volume~...~percent~..."`

use super::{number, optional_number, DialectParser, QuoteFields};
use crate::router::Dialect;

const PRICE: usize = 3;
const VOLUME: usize = 6;
const PERCENT: usize = 32;

/// Tilde-separated general dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralParser;

impl DialectParser for GeneralParser {
    fn dialect(&self) -> Dialect {
        Dialect::General
    }

    fn variable_prefix(&self) -> &'static str {
        "v_"
    }

    fn separator(&self) -> char {
        '~'
    }

    fn min_fields(&self) -> usize {
        PERCENT + 1
    }

    fn parse_fields(&self, fields: &[&str]) -> Option<QuoteFields> {
        Some(QuoteFields {
            price: number(fields, PRICE)?,
            change_percent: number(fields, PERCENT)?,
            volume: optional_number(fields, VOLUME),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_batch;
    use crate::router::QuoteSourceRouter;
    use ticker_core::types::Instrument;

    /// Build a general-dialect record with `len` fields.
    fn record(code: &str, price: &str, percent: &str, len: usize) -> String {
        let mut fields: Vec<String> = (0..len).map(|i| format!("{i}")).collect();
        fields[0] = "1".into();
        fields[1] = "Index".into();
        fields[2] = code[2..].to_string();
        fields[3] = price.into();
        fields[4] = "2990.00".into();
        if len > 6 {
            fields[6] = "123456".into();
        }
        if len > 32 {
            fields[32] = percent.into();
        }
        format!("v_{}=\"{}\";", code, fields.join("~"))
    }

    fn parse(payload: &str, codes: &[&str]) -> ticker_core::types::QuoteMap {
        let instruments: Vec<Instrument> =
            codes.iter().map(|c| Instrument::new(*c, *c)).collect();
        let batch = QuoteSourceRouter::new().plan(&instruments).remove(0);
        parse_batch(payload, &batch)
    }

    #[test]
    fn test_general_record() {
        let payload = record("sh000001", "3000.00", "0.33", 50);
        let quotes = parse(&payload, &["sh000001"]);

        let quote = &quotes["sh000001"];
        assert_eq!(quote.identifier, "sh000001");
        assert_eq!(quote.price, 3000.00);
        assert_eq!(quote.change_percent, 0.33);
        assert_eq!(quote.volume, 123456.0);
    }

    #[test]
    fn test_exactly_minimum_fields() {
        let payload = record("sh000681", "1775.82", "-0.47", 33);
        let quotes = parse(&payload, &["sh000681"]);

        assert_eq!(quotes["sh000681"].price, 1775.82);
        assert_eq!(quotes["sh000681"].change_percent, -0.47);
    }

    #[test]
    fn test_truncated_record_dropped() {
        let payload = format!(
            "{}\n{}",
            record("sh000001", "3000.00", "0.33", 40),
            record("sh000832", "400.10", "0.10", 20)
        );
        let quotes = parse(&payload, &["sh000001", "sh000832"]);

        assert_eq!(quotes.len(), 1);
        assert!(quotes.contains_key("sh000001"));
    }

    #[test]
    fn test_non_numeric_record_dropped() {
        let payload = format!(
            "{}{}",
            record("sh000001", "n/a", "0.33", 40),
            record("sz399001", "9800.5", "-1.25", 40)
        );
        let quotes = parse(&payload, &["sh000001", "sz399001"]);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes["sz399001"].change_percent, -1.25);
    }

    #[test]
    fn test_alias_key_restored() {
        let payload = record("sh000832", "400.10", "0.10", 40);
        let quotes = parse(&payload, &["csi000832"]);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes["csi000832"].identifier, "csi000832");
        assert!(!quotes.contains_key("sh000832"));
    }

    #[test]
    fn test_unknown_code_placeholder() {
        let quotes = parse("v_pv_none_match=\"1\";\n", &["sh999999"]);
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_whitespace_tolerated() {
        let payload = format!("  \r\n {}  \n", record("sh518880", "5.123", "1.02", 35));
        let quotes = parse(&payload, &["sh518880"]);

        assert_eq!(quotes["sh518880"].price, 5.123);
    }
}

//! Historical daily bar parser.
//!
//! Payload shape:
//! `{"data": {"sh000001": {"qfqday": [["2024-01-02", "open", "close", "high", "low", "volume", ...], ...]}}}`

use serde_json::Value;
use ticker_core::error::ParseError;
use ticker_core::types::Bar;
use tracing::debug;

/// Adjusted series, preferred when present.
const ADJUSTED_FIELD: &str = "qfqday";
/// Raw series.
const RAW_FIELD: &str = "day";

/// Parse a bar payload for `code`.
///
/// Returns an empty vector when the payload is not JSON, the code is absent,
/// or the shape is unexpected. Rows with a missing or malformed field are
/// dropped. Order is preserved as delivered (oldest first).
pub fn parse_bars(payload: &str, code: &str) -> Vec<Bar> {
    match serde_json::from_str::<Value>(payload) {
        Ok(value) => parse_bars_value(&value, code),
        Err(e) => {
            debug!(code, error = %ParseError::from(e), "Bar payload is not JSON");
            Vec::new()
        }
    }
}

/// Parse an already decoded bar payload.
pub fn parse_bars_value(value: &Value, code: &str) -> Vec<Bar> {
    let rows = match series_rows(value, code) {
        Ok(rows) => rows,
        Err(e) => {
            debug!(code, error = %e, "Bar payload not usable");
            return Vec::new();
        }
    };

    let bars: Vec<Bar> = rows.iter().filter_map(parse_row).collect();
    if bars.len() < rows.len() {
        debug!(
            code,
            dropped = rows.len() - bars.len(),
            "Dropped malformed bar rows"
        );
    }
    bars
}

/// Locate the row array for `code`, adjusted first.
fn series_rows<'a>(value: &'a Value, code: &str) -> Result<&'a Vec<Value>, ParseError> {
    let series = value
        .get("data")
        .and_then(|data| data.get(code))
        .ok_or_else(|| ParseError::Shape(format!("no entry for {code}")))?;

    series
        .get(ADJUSTED_FIELD)
        .and_then(Value::as_array)
        .or_else(|| series.get(RAW_FIELD).and_then(Value::as_array))
        .ok_or_else(|| ParseError::Shape(format!("no day series for {code}")))
}

/// `[date, open, close, high, low, volume, ...]`
fn parse_row(row: &Value) -> Option<Bar> {
    let row = row.as_array()?;
    let date = row.first()?.as_str()?.trim();
    if date.is_empty() {
        return None;
    }

    Some(Bar::new(
        date,
        coerce(row.get(1)?)?,
        coerce(row.get(2)?)?,
        coerce(row.get(3)?)?,
        coerce(row.get(4)?)?,
        coerce(row.get(5)?)?,
    ))
}

/// Accept numbers and numeric strings.
fn coerce(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_adjusted_series() {
        let payload = r#"{"code":0,"data":{"sh588000":{
            "day":[["2024-01-02","9","9","9","9","9"]],
            "qfqday":[["2024-01-02","1.000","1.010","1.020","0.990","123456.000"],
                      ["2024-01-03","1.010","1.030","1.040","1.000","223456.000"]]
        }}}"#;
        let bars = parse_bars(payload, "sh588000");

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0], Bar::new("2024-01-02", 1.0, 1.01, 1.02, 0.99, 123456.0));
        assert_eq!(bars[1].date, "2024-01-03");
        assert_eq!(bars[1].close, 1.03);
    }

    #[test]
    fn test_falls_back_to_raw_series() {
        let payload = r#"{"data":{"sh000832":{"day":[["2024-01-02",400.1,401.5,402.0,399.0,1.5e6]]}}}"#;
        let bars = parse_bars(payload, "sh000832");

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].volume, 1.5e6);
        assert_eq!(bars[0].high, 402.0);
    }

    #[test]
    fn test_drops_malformed_rows_and_keeps_order() {
        let payload = r#"{"data":{"sh000001":{"qfqday":[
            ["2024-01-02","1","2","3","0.5","10"],
            ["2024-01-03","1","oops","3","0.5","10"],
            ["2024-01-04","1","2","3","0.5"],
            ["2024-01-05","1","2","3","0.5","10",{"nd":"2024"}],
            "garbage",
            ["2024-01-08","1","2","3","0.5","10"]
        ]}}}"#;
        let bars = parse_bars(payload, "sh000001");
        let dates: Vec<&str> = bars.iter().map(|b| b.date.as_str()).collect();

        assert_eq!(dates, vec!["2024-01-02", "2024-01-05", "2024-01-08"]);
    }

    #[test]
    fn test_unexpected_shapes_yield_empty() {
        assert!(parse_bars("not json", "sh000001").is_empty());
        assert!(parse_bars(r#"{"data":{}}"#, "sh000001").is_empty());
        assert!(parse_bars(r#"{"data":[]}"#, "sh000001").is_empty());
        assert!(parse_bars(r#"{"data":{"sh000001":{"qfqday":"x"}}}"#, "sh000001").is_empty());
        assert!(parse_bars(r#"{"code":-1,"msg":"param error"}"#, "sh000001").is_empty());
    }

    #[test]
    fn test_shape_errors_name_the_problem() {
        let value: Value = serde_json::from_str(r#"{"data":{"sh000001":{}}}"#).unwrap();
        let err = series_rows(&value, "sh000001").unwrap_err();
        assert!(matches!(err, ParseError::Shape(ref m) if m.contains("no day series")));

        let err = series_rows(&value, "sz399001").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected payload shape: no entry for sz399001");
    }

    #[test]
    fn test_other_code_ignored() {
        let payload = r#"{"data":{"sz399001":{"day":[["2024-01-02","1","2","3","0.5","10"]]}}}"#;
        assert!(parse_bars(payload, "sh000001").is_empty());
    }
}

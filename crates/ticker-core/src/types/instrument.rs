//! Watchlist instrument.

use serde::{Deserialize, Serialize};

/// An instrument on the watchlist.
///
/// The identifier is an opaque upstream code such as `sh000001`, `gds_AUTD`
/// or `nf_AU0`. On disk the fields keep the short `code`/`name` keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    #[serde(rename = "code", alias = "identifier")]
    pub identifier: String,
    #[serde(rename = "name", alias = "display_name")]
    pub display_name: String,
}

impl Instrument {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_uses_short_keys() {
        let inst = Instrument::new("sh518880", "黄金ETF");
        let json = serde_json::to_string(&inst).unwrap();
        assert_eq!(json, r#"{"code":"sh518880","name":"黄金ETF"}"#);
    }

    #[test]
    fn test_instrument_accepts_long_keys() {
        let inst: Instrument =
            serde_json::from_str(r#"{"identifier":"nf_AU0","display_name":"Gold"}"#).unwrap();
        assert_eq!(inst, Instrument::new("nf_AU0", "Gold"));
    }
}

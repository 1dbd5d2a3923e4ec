//! Quote source routing.
//!
//! Maps each watchlist identifier to the upstream dialect that serves it and
//! to the code that dialect expects in the query. The mapping is total:
//! anything unrecognised goes to the general dialect unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ticker_core::types::Instrument;

/// Upstream quote dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dialect {
    /// Equities, funds and indices (`v_sh000001="1~...~"`)
    General,
    /// Spot commodities (`hq_str_gds_AUTD="..."`)
    CommoditySpot,
    /// Futures and forex (`hq_str_nf_AU0="..."`)
    Futures,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::General => f.write_str("general"),
            Dialect::CommoditySpot => f.write_str("commodity-spot"),
            Dialect::Futures => f.write_str("futures"),
        }
    }
}

/// Spot marker for commodity codes.
pub const SPOT_PREFIX: &str = "gds_";
/// Futures and forex marker.
pub const FUTURES_PREFIX: &str = "nf_";

/// Commodity symbols that may be listed without the spot marker.
const BARE_COMMODITIES: &[&str] = &[
    "AUTD", "AGTD", "MAUTD", "AU9999", "AU9995", "AU100G", "PT9995",
];

/// Legacy index prefixes and their canonical replacement.
const INDEX_ALIASES: &[(&str, &str)] = &[("zs_sh", "sh"), ("zs_sz", "sz"), ("csi", "sh")];

/// Where and how to query one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub dialect: Dialect,
    /// Code sent upstream; may differ from the watchlist identifier
    pub query_code: String,
}

/// One upstream request covering every identifier of a dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBatch {
    pub dialect: Dialect,
    /// Deduplicated query codes in first-seen order
    pub codes: Vec<String>,
    /// Query code to the identifiers that asked for it
    pub requested: HashMap<String, Vec<String>>,
}

impl QueryBatch {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            codes: Vec::new(),
            requested: HashMap::new(),
        }
    }

    fn push(&mut self, route: Route, identifier: &str) {
        let owners = self.requested.entry(route.query_code.clone()).or_default();
        if owners.is_empty() {
            self.codes.push(route.query_code);
        }
        if !owners.iter().any(|o| o == identifier) {
            owners.push(identifier.to_string());
        }
    }

    /// Identifiers a response code belongs to; empty for codes this batch
    /// never asked for.
    pub fn owners(&self, code: &str) -> &[String] {
        self.requested
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Comma-joined query string.
    pub fn query(&self) -> String {
        self.codes.join(",")
    }
}

/// Classifies identifiers into dialects.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteSourceRouter;

impl QuoteSourceRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route a single identifier.
    pub fn route(&self, identifier: &str) -> Route {
        if identifier.starts_with(SPOT_PREFIX) {
            return Route {
                dialect: Dialect::CommoditySpot,
                query_code: identifier.to_string(),
            };
        }

        if identifier.starts_with(FUTURES_PREFIX) {
            return Route {
                dialect: Dialect::Futures,
                query_code: identifier.to_string(),
            };
        }

        let upper = identifier.to_ascii_uppercase();
        if BARE_COMMODITIES.contains(&upper.as_str()) {
            return Route {
                dialect: Dialect::CommoditySpot,
                query_code: format!("{SPOT_PREFIX}{upper}"),
            };
        }

        let query_code = INDEX_ALIASES
            .iter()
            .find_map(|(alias, canonical)| {
                identifier
                    .strip_prefix(alias)
                    .map(|rest| format!("{canonical}{rest}"))
            })
            .unwrap_or_else(|| identifier.to_string());

        Route {
            dialect: Dialect::General,
            query_code,
        }
    }

    /// Group instruments into one batch per dialect, ordered by dialect.
    pub fn plan(&self, instruments: &[Instrument]) -> Vec<QueryBatch> {
        let mut batches: Vec<QueryBatch> = Vec::new();

        for instrument in instruments {
            let route = self.route(&instrument.identifier);
            let index = match batches.iter().position(|b| b.dialect == route.dialect) {
                Some(index) => index,
                None => {
                    batches.push(QueryBatch::new(route.dialect));
                    batches.len() - 1
                }
            };
            batches[index].push(route, &instrument.identifier);
        }

        batches.sort_by_key(|b| b.dialect);
        batches
    }
}

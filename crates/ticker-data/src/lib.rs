//! Quote routing, dialect parsers and HTTP feeds.
//!
//! - [`QuoteSourceRouter`] maps identifiers to upstream dialects
//! - [`parser`] decodes each dialect's batch payload
//! - [`bars`] decodes historical daily bars
//! - [`HttpFeed`] fetches both over HTTP

pub mod bars;
pub mod http;
pub mod parser;
pub mod router;

pub use bars::{parse_bars, parse_bars_value};
pub use http::{FeedEndpoints, HttpFeed};
pub use parser::{parse_batch, parser_for, DialectParser, QuoteFields};
pub use router::{Dialect, QueryBatch, QuoteSourceRouter, Route};

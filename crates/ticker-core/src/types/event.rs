//! Session move events and the persisted session state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::PersistenceError;

/// Date format of [`SessionSnapshot::date`].
pub const SESSION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of notable move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Change percent crossed zero
    SignFlip,
    /// |change percent| moved past a higher integer boundary
    ThresholdCross,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::SignFlip => f.write_str("sign flip"),
            MoveKind::ThresholdCross => f.write_str("threshold cross"),
        }
    }
}

/// A notable move detected between two successive quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub identifier: String,
    pub kind: MoveKind,
    pub previous_percent: f64,
    pub current_percent: f64,
}

/// Per-day extrema as written to the watchlist file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Local trading date, `YYYY-MM-DD`
    pub date: String,
    /// Identifier to the largest |change percent| seen that day
    #[serde(default)]
    pub extrema: BTreeMap<String, f64>,
}

impl SessionSnapshot {
    pub fn new(date: NaiveDate, extrema: BTreeMap<String, f64>) -> Self {
        Self {
            date: date.format(SESSION_DATE_FORMAT).to_string(),
            extrema,
        }
    }

    /// Parse the stored date.
    pub fn day(&self) -> Result<NaiveDate, PersistenceError> {
        NaiveDate::parse_from_str(&self.date, SESSION_DATE_FORMAT)
            .map_err(|_| PersistenceError::InvalidDate(self.date.clone()))
    }
}

//! Per-session move tracking.
//!
//! Keeps the last change percent and the day's largest |change percent| for
//! every instrument, and reports sign flips and integer threshold crossings
//! between successive observations. Extrema reset at the first observation
//! after the local date changes; the last percent survives the rollover.

use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use ticker_core::types::{MoveEvent, MoveKind, Quote, QuoteMap, SessionSnapshot};
use tracing::{debug, info, warn};

/// Running session state. Owned by the poll task.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    day: NaiveDate,
    prior: HashMap<String, f64>,
    extrema: BTreeMap<String, f64>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl SessionTracker {
    /// Create an empty tracker for `day`.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            prior: HashMap::new(),
            extrema: BTreeMap::new(),
        }
    }

    /// Current session date.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Largest |change percent| seen today.
    pub fn max_abs_change(&self, identifier: &str) -> Option<f64> {
        self.extrema.get(identifier).copied()
    }

    /// Last observed change percent.
    pub fn prior_percent(&self, identifier: &str) -> Option<f64> {
        self.prior.get(identifier).copied()
    }

    /// Observe a quote using the local wall-clock date.
    pub fn observe(&mut self, quote: &Quote) -> Vec<MoveEvent> {
        self.observe_at(Local::now().date_naive(), quote)
    }

    /// Observe a quote on `today`.
    pub fn observe_at(&mut self, today: NaiveDate, quote: &Quote) -> Vec<MoveEvent> {
        self.roll_to(today);

        let current = quote.change_percent;
        let abs = current.abs();
        self.extrema
            .entry(quote.identifier.clone())
            .and_modify(|max| *max = max.max(abs))
            .or_insert(abs);

        let Some(previous) = self.prior.insert(quote.identifier.clone(), current) else {
            return Vec::new();
        };

        detect_moves(previous, current)
            .map(|kind| MoveEvent {
                identifier: quote.identifier.clone(),
                kind,
                previous_percent: previous,
                current_percent: current,
            })
            .collect()
    }

    /// Observe a whole batch on `today`. Events are ordered by identifier.
    pub fn observe_batch_at(&mut self, today: NaiveDate, quotes: &QuoteMap) -> Vec<MoveEvent> {
        let mut ids: Vec<&String> = quotes.keys().collect();
        ids.sort();

        let events: Vec<MoveEvent> = ids
            .into_iter()
            .flat_map(|id| self.observe_at(today, &quotes[id]))
            .collect();

        for event in &events {
            info!(
                identifier = %event.identifier,
                kind = %event.kind,
                previous = event.previous_percent,
                current = event.current_percent,
                "Notable move"
            );
        }

        events
    }

    /// Snapshot today's extrema for persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.day, self.extrema.clone())
    }

    /// Adopt persisted extrema when they belong to the current day.
    ///
    /// Returns whether the snapshot was adopted.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> bool {
        match snapshot.day() {
            Ok(day) if day == self.day => {
                for (id, value) in &snapshot.extrema {
                    let entry = self.extrema.entry(id.clone()).or_insert(*value);
                    *entry = entry.max(*value);
                }
                debug!(%day, instruments = snapshot.extrema.len(), "Restored session extrema");
                true
            }
            Ok(day) => {
                debug!(%day, today = %self.day, "Ignoring stale session snapshot");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ignoring session snapshot");
                false
            }
        }
    }

    fn roll_to(&mut self, today: NaiveDate) {
        if today != self.day {
            info!(from = %self.day, to = %today, "New session day, resetting extrema");
            self.day = today;
            self.extrema.clear();
        }
    }
}

/// Move kinds between two successive change percents.
fn detect_moves(previous: f64, current: f64) -> impl Iterator<Item = MoveKind> {
    let sign_flip = (previous >= 0.0 && current < 0.0) || (previous <= 0.0 && current > 0.0);
    let threshold = current.abs().floor() > previous.abs().floor();

    [
        sign_flip.then_some(MoveKind::SignFlip),
        threshold.then_some(MoveKind::ThresholdCross),
    ]
    .into_iter()
    .flatten()
}

//! Scoring engine and analysis reports.
//!
//! This crate turns a bar history into an advisory verdict:
//! - [`ScoringEngine`] combines price and indicators into a [`ScoreResult`](ticker_core::ScoreResult)
//! - [`Analyzer`] fetches bars and runs the indicator and scoring engines
//! - [`render_report`] formats the outcome for the terminal

mod analyzer;
mod report;
pub mod scoring;

pub use analyzer::{AnalysisReport, Analyzer, Assessment};
pub use report::render_report;
pub use scoring::ScoringEngine;

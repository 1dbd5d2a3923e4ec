//! Plain-text analysis report.

use ticker_core::types::{SentimentLabel, TrendLabel, VolumeLabel};

use crate::analyzer::{AnalysisReport, Assessment};

/// Render a report for the terminal.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut s = String::new();
    let instrument = &report.instrument;

    s.push_str(&format!(
        "======== {} ({}) technical analysis ========\n",
        instrument.display_name, instrument.identifier
    ));

    match &report.assessment {
        Some(assessment) => render_assessment(&mut s, assessment, report.bar_count),
        None => s.push_str(&format!("No data ({} bars available)\n", report.bar_count)),
    }

    s
}

fn render_assessment(s: &mut String, a: &Assessment, bar_count: usize) {
    let ind = &a.indicators;
    let score = &a.score;

    s.push_str(&format!(
        "Current price: {:.3}  (prior close {:.3}, {} bars)\n",
        a.price, a.prior_close, bar_count
    ));

    s.push_str("--- Trend ---\n");
    match (ind.ma20, ind.ma5) {
        (Some(ma20), ma5) => {
            let position = if a.price > ma20 { "above" } else { "at or below" };
            s.push_str(&format!(
                "[{}] price is {} MA20 ({:.3})\n",
                score.trend_label, position, ma20
            ));
            if let Some(ma5) = ma5 {
                let relation = if ma5 > ma20 {
                    "MA5 > MA20, short-term attack"
                } else if ma5 < ma20 {
                    "MA5 < MA20, short-term pullback"
                } else {
                    "MA5 = MA20"
                };
                s.push_str(relation);
                s.push('\n');
            }
        }
        (None, _) => s.push_str(&format!(
            "[{}] not enough bars for MA20\n",
            TrendLabel::Unknown
        )),
    }
    if let Some(ma60) = ind.ma60 {
        s.push_str(&format!("MA60: {ma60:.3}\n"));
    }

    s.push_str("--- Volume ---\n");
    match ind.volume_ratio {
        Some(ratio) => {
            let note = match score.volume_label {
                VolumeLabel::Expanding => "money flowing in",
                VolumeLabel::Contracting => "sellers holding back",
                _ => "activity steady",
            };
            s.push_str(&format!(
                "[{}] volume ratio {:.2}, {}\n",
                score.volume_label, ratio, note
            ));
        }
        None => s.push_str(&format!(
            "[{}] volume ratio unavailable\n",
            VolumeLabel::Unknown
        )),
    }

    s.push_str("--- Sentiment (RSI) ---\n");
    match ind.rsi14 {
        Some(rsi) => {
            let note = match score.sentiment_label {
                SentimentLabel::Overbought => "overheated, a pullback may come",
                SentimentLabel::Oversold => "washed out, a rebound is likely",
                _ => "within the normal range",
            };
            s.push_str(&format!("RSI(14): {rsi:.2}\n"));
            s.push_str(&format!("[{}] {}\n", score.sentiment_label, note));
        }
        None => s.push_str(&format!(
            "[{}] RSI(14) unavailable\n",
            SentimentLabel::Unknown
        )),
    }

    s.push_str("--- Momentum ---\n");
    match ind.macd {
        Some(m) => s.push_str(&format!(
            "MACD: DIF {:.4}  DEA {:.4}  BAR {:.4} (prev {:.4})\n",
            m.dif, m.dea, m.bar, m.prev_bar
        )),
        None => s.push_str("MACD: unavailable\n"),
    }
    match ind.kdj {
        Some(k) => s.push_str(&format!(
            "KDJ: K {:.2}  D {:.2}  J {:.2}\n",
            k.k, k.d, k.j
        )),
        None => s.push_str("KDJ: unavailable\n"),
    }

    s.push_str("--- Verdict ---\n");
    s.push_str(&format!(
        "Score: {:+.1}  Conclusion: {}\n",
        score.score, score.conclusion
    ));
    s.push_str(score.conclusion.advice());
    s.push('\n');
}

//! Same-day performance report for a ranking.
//!
//! Each ranked symbol gets today's open (first one-minute bar) and latest
//! close, plus the percentage move between them. Rows come out in ranking
//! order; a symbol whose prices cannot be fetched is listed under
//! `failures` and the rest of the report carries on.

use serde::{Deserialize, Serialize};
use trendscore_core::data::BarProvider;

use crate::ranking::RankedSymbol;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub symbol: String,
    pub score: u32,
    pub open_price: f64,
    pub close_price: f64,
    pub percent_change: f64,
}

impl ReportRow {
    /// Strictly positive move since the open.
    pub fn is_gain(&self) -> bool {
        self.percent_change > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFailure {
    pub symbol: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<ReportFailure>,
}

pub fn build_report(ranked: &[RankedSymbol], provider: &dyn BarProvider) -> ReportOutcome {
    let mut outcome = ReportOutcome::default();

    for entry in ranked {
        match provider.fetch_intraday_open_close(&entry.symbol) {
            Ok(prices) => outcome.rows.push(ReportRow {
                symbol: entry.symbol.clone(),
                score: entry.score,
                open_price: prices.open,
                close_price: prices.close,
                percent_change: prices.percent_change(),
            }),
            Err(e) => {
                tracing::warn!(symbol = %entry.symbol, error = %e, "no same-day prices");
                outcome.failures.push(ReportFailure {
                    symbol: entry.symbol.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    outcome
}

//! Export of scan results: JSON and CSV.
//!
//! - **JSON**: the whole `ScanOutcome` (cards, ranking, skips, report)
//! - **CSV**: one row per ranked symbol with its same-day prices when a
//!   report was built

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::report::ReportRow;
use crate::scan::ScanOutcome;

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(outcome: &ScanOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("failed to serialize scan outcome to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Ranking as CSV.
///
/// Columns: rank, symbol, score, open_price, close_price, percent_change.
/// Price columns are empty for symbols without a report row.
pub fn export_csv(outcome: &ScanOutcome) -> Result<String> {
    let rows: HashMap<&str, &ReportRow> = outcome
        .report
        .iter()
        .flat_map(|report| report.rows.iter())
        .map(|row| (row.symbol.as_str(), row))
        .collect();

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "rank",
        "symbol",
        "score",
        "open_price",
        "close_price",
        "percent_change",
    ])?;

    for entry in &outcome.ranking {
        let prices = match rows.get(entry.symbol.as_str()) {
            Some(row) => [
                format!("{:.4}", row.open_price),
                format!("{:.4}", row.close_price),
                format!("{:.4}", row.percent_change),
            ],
            None => Default::default(),
        };
        wtr.write_record([
            &entry.rank.to_string(),
            &entry.symbol,
            &entry.score.to_string(),
            &prices[0],
            &prices[1],
            &prices[2],
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write the CSV ranking to `path`, replacing any existing file.
pub fn write_csv(outcome: &ScanOutcome, path: &Path) -> Result<()> {
    let csv = export_csv(outcome)?;
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

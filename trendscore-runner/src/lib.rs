//! TrendScore Runner: composite scoring, ranking, reporting, and scans.
//!
//! This crate builds on `trendscore-core` to provide:
//! - The composite scorer (ten votes summed into a 0–10 score)
//! - Insertion-ordered score tables and a stable descending ranking
//! - Same-day open/close reports for a ranking
//! - Scan orchestration with skip/abstain/abort policies and rayon parallelism
//! - TOML scan configuration and JSON/CSV export

pub mod config;
pub mod export;
pub mod ranking;
pub mod report;
pub mod scan;
pub mod scorer;

pub use config::{ConfigError, HistoryConfig, ScanConfig, UniverseConfig};
pub use export::{export_csv, export_json, write_csv};
pub use ranking::{rank, RankedSymbol, TrendScores};
pub use report::{build_report, ReportFailure, ReportOutcome, ReportRow};
pub use scan::{
    run_scan, InsufficientDataPolicy, ScanError, ScanOutcome, Scanner, SkipReason, SkippedSymbol,
};
pub use scorer::{IndicatorVerdict, ScoreCard, Scorer};

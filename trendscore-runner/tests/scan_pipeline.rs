//! End-to-end scans against in-memory and synthetic providers.

use chrono::{Duration, TimeZone, Utc};
use trendscore_core::data::{InMemoryProvider, SyntheticProvider, Universe};
use trendscore_core::domain::{Bar, BarSeries};
use trendscore_runner::{
    export_csv, run_scan, write_csv, InsufficientDataPolicy, ScanConfig, ScanError, Scanner,
    SkipReason,
};

fn trending(symbol: &str, n: usize, step: f64) -> BarSeries {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = 100.0 + step * i as f64;
            Bar {
                timestamp: base + Duration::days(i as i64),
                open: close - step / 2.0,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000.0,
            }
        })
        .collect();
    BarSeries::new(symbol, bars).unwrap()
}

fn provider() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_series(trending("UP", 80, 1.0))
        .with_series(trending("DOWN", 80, -0.5))
        .with_series(trending("SHORT", 10, 1.0))
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn skip_policy_drops_short_and_missing_symbols() {
    let config = ScanConfig::default();
    let outcome = run_scan(
        &config,
        &symbols(&["DOWN", "SHORT", "MISSING", "UP"]),
        &provider(),
    )
    .unwrap();

    let scanned: Vec<&str> = outcome.cards.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(scanned, ["DOWN", "UP"]);

    assert_eq!(outcome.skipped.len(), 2);
    assert_eq!(outcome.skipped[0].symbol, "SHORT");
    assert_eq!(outcome.skipped[0].reason, SkipReason::InsufficientData);
    assert_eq!(outcome.skipped[1].symbol, "MISSING");
    assert_eq!(outcome.skipped[1].reason, SkipReason::Data);

    assert_eq!(outcome.ranking[0].symbol, "UP");
    assert!(outcome.scores.get("UP").unwrap() > outcome.scores.get("DOWN").unwrap());

    let report = outcome.report.unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].symbol, "UP");
    assert!(report.rows[0].is_gain());
    assert!(!report.rows[1].is_gain());
}

#[test]
fn abstain_policy_scores_short_series() {
    let config = ScanConfig {
        on_insufficient_data: InsufficientDataPolicy::Abstain,
        report: false,
        ..ScanConfig::default()
    };
    let outcome = run_scan(&config, &symbols(&["SHORT", "UP"]), &provider()).unwrap();

    assert!(outcome.skipped.is_empty());
    assert!(outcome.report.is_none());
    let short = &outcome.cards[0];
    assert_eq!(short.symbol, "SHORT");
    assert!(!short.abstained.is_empty());
    assert_eq!(short.verdicts.len() + short.abstained.len(), 10);
    assert!(outcome.cards[1].abstained.is_empty());
}

#[test]
fn abort_policy_stops_the_scan() {
    for parallel in [false, true] {
        let config = ScanConfig {
            on_insufficient_data: InsufficientDataPolicy::Abort,
            parallel,
            ..ScanConfig::default()
        };
        let err = run_scan(&config, &symbols(&["UP", "SHORT", "DOWN"]), &provider()).unwrap_err();
        match err {
            ScanError::InsufficientData { symbol, .. } => assert_eq!(symbol, "SHORT"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn data_failures_do_not_abort() {
    let config = ScanConfig {
        on_insufficient_data: InsufficientDataPolicy::Abort,
        report: false,
        ..ScanConfig::default()
    };
    let outcome = run_scan(&config, &symbols(&["NOPE", "UP"]), &provider()).unwrap();
    assert_eq!(outcome.cards.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::Data);
}

#[test]
fn parallel_and_sequential_rank_identically() {
    let universe = Universe::nasdaq_100();
    let tickers = &universe.tickers()[..30];
    let provider = SyntheticProvider::new(9);

    let sequential = ScanConfig {
        report: false,
        ..ScanConfig::default()
    };
    let parallel = ScanConfig {
        parallel: true,
        ..sequential.clone()
    };

    let a = run_scan(&sequential, tickers, &provider).unwrap();
    let b = run_scan(&parallel, tickers, &provider).unwrap();

    assert_eq!(a.ranking, b.ranking);
    assert_eq!(a.cards, b.cards);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.cards.len(), 30);
}

#[test]
fn explain_lists_every_indicator() {
    let config = ScanConfig::default();
    let provider = provider();
    let scanner = Scanner::new(&config, &provider).unwrap();

    let card = scanner.explain("SHORT").unwrap();
    assert_eq!(card.verdicts.len() + card.abstained.len(), 10);
    assert!(scanner.explain("MISSING").is_err());
}

#[test]
fn config_and_universe_files_drive_a_scan() {
    let dir = tempfile::tempdir().unwrap();
    let universe_path = dir.path().join("universe.toml");
    std::fs::write(&universe_path, "name = \"pair\"\ntickers = [\"up\", \"down\"]\n").unwrap();

    let config_path = dir.path().join("scan.toml");
    std::fs::write(
        &config_path,
        format!(
            "report = false\n\n[universe]\nfile = {:?}\n\n[history]\nperiod = \"6mo\"\n",
            universe_path.display().to_string()
        ),
    )
    .unwrap();

    let config = ScanConfig::from_file(&config_path).unwrap();
    let universe = config.resolve_universe().unwrap();
    assert_eq!(universe.name, "pair");

    let outcome = run_scan(&config, universe.tickers(), &provider()).unwrap();
    assert_eq!(outcome.ranking.len(), 2);
    assert_eq!(outcome.ranking[0].symbol, "UP");
}

#[test]
fn csv_export_writes_ranking() {
    let outcome = run_scan(&ScanConfig::default(), &symbols(&["DOWN", "UP"]), &provider()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.csv");

    write_csv(&outcome, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, export_csv(&outcome).unwrap());

    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("rank,symbol,score,open_price,close_price,percent_change")
    );
    assert!(lines.next().unwrap().starts_with("1,UP,"));
    assert!(lines.next().unwrap().starts_with("2,DOWN,"));
}

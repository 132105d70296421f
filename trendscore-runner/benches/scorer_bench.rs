//! Criterion benchmarks for the scan hot path.
//!
//! Benchmarks:
//! 1. Scoring one year of daily bars with the full library
//! 2. Full synthetic scans, sequential vs parallel
//! 3. Ranking a large score table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trendscore_core::data::{BarProvider, Interval, Period, SyntheticProvider, Universe};
use trendscore_runner::{rank, run_scan, ScanConfig, Scorer, TrendScores};

fn bench_score(c: &mut Criterion) {
    let series = SyntheticProvider::new(1)
        .fetch_history("BENCH", Period::Year1, Interval::Day1)
        .unwrap();
    let scorer = Scorer::default();

    c.bench_function("score_1y_daily", |b| {
        b.iter(|| scorer.score(black_box(&series)))
    });
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_nasdaq_100");
    group.sample_size(20);

    let provider = SyntheticProvider::new(1);
    let universe = Universe::nasdaq_100();

    for parallel in [false, true] {
        let config = ScanConfig {
            parallel,
            report: false,
            ..ScanConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::new("parallel", parallel),
            &config,
            |b, config| b.iter(|| run_scan(config, universe.tickers(), &provider)),
        );
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let scores: TrendScores = (0..5_000u32)
        .map(|i| (format!("SYM{i}"), (i * 7) % 11))
        .collect();

    c.bench_function("rank_5000", |b| b.iter(|| rank(black_box(&scores))));
}

criterion_group!(benches, bench_score, bench_scan, bench_rank);
criterion_main!(benches);

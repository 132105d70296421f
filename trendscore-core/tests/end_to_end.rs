//! End-to-end indicator checks on hand-built and provider-built series.

use chrono::{Duration, TimeZone, Utc};
use trendscore_core::data::{BarProvider, Interval, Period, SyntheticProvider};
use trendscore_core::domain::{Bar, BarSeries};
use trendscore_core::indicators::{
    default_library, Chaikin, IndicatorError, MovingAverageTrend, OnBalanceVolume, ParabolicSar,
    RateOfChange, Rsi, TrendIndicator,
};

/// 30 daily bars, closes rising by one each day, constant volume.
fn rising_series() -> BarSeries {
    rising_series_of(30)
}

fn rising_series_of(n: i64) -> BarSeries {
    let base = Utc.with_ymd_and_hms(2024, 2, 1, 21, 0, 0).unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = 100.0 + i as f64;
            Bar {
                timestamp: base + Duration::days(i),
                open: close - 0.5,
                high: close + 0.5,
                low: close - 1.0,
                close,
                volume: 2_500_000.0,
            }
        })
        .collect();
    BarSeries::new("UPUP", bars).unwrap()
}

#[test]
fn rising_series_is_bullish_on_core_indicators() {
    let series = rising_series();
    let bars = series.bars();

    assert_eq!(MovingAverageTrend::default().evaluate(bars), Ok(true));
    assert_eq!(Rsi::new(14, 50.0).evaluate(bars), Ok(true));
    assert_eq!(RateOfChange::default().evaluate(bars), Ok(true));
    assert_eq!(OnBalanceVolume::default().evaluate(bars), Ok(true));
    assert_eq!(ParabolicSar::default().evaluate(bars), Ok(true));
}

#[test]
fn thirty_bars_are_short_only_for_ichimoku() {
    let series = rising_series();
    for indicator in default_library() {
        let verdict = indicator.evaluate(series.bars());
        if indicator.name() == "ichimoku_9_26_52" {
            assert_eq!(
                verdict,
                Err(IndicatorError::InsufficientData {
                    indicator: "ichimoku_9_26_52".into(),
                    required: 52,
                    available: 30,
                })
            );
        } else {
            assert!(verdict.is_ok(), "{} rejected a 30-bar series", indicator.name());
        }
    }
}

#[test]
fn ichimoku_length_series_runs_the_full_library() {
    let series = rising_series_of(52);
    for indicator in default_library() {
        assert!(
            indicator.evaluate(series.bars()).is_ok(),
            "{} rejected a 52-bar series",
            indicator.name()
        );
    }
}

#[test]
fn chaikin_needs_a_wider_week_to_vote() {
    let series = rising_series();
    // A three-bar oscillator needs six bars; a five-bar week never defines it.
    assert_eq!(Chaikin::default().evaluate(series.bars()), Ok(false));
    assert!(Chaikin::new(3, 10).evaluate(series.bars()).is_ok());
}

#[test]
fn synthetic_history_feeds_every_indicator() {
    let provider = SyntheticProvider::new(42);
    let series = provider
        .fetch_history("AAPL", Period::Month3, Interval::Day1)
        .unwrap();
    assert_eq!(series.len(), 63);
    for indicator in default_library() {
        assert!(indicator.evaluate(series.bars()).is_ok(), "{}", indicator.name());
    }
}

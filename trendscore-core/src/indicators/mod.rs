//! Trend indicators.
//!
//! Each indicator reads a bar slice and answers one question: does this series
//! look like an upward trend? All ten implement [`TrendIndicator`] so the
//! composite scorer can run them uniformly over the same snapshot.
//!
//! The numeric series behind each verdict (RSI line, MACD lines, ADX, ...) are
//! exposed as plain functions returning index-aligned `Vec<f64>`, with `NaN`
//! wherever the lookback window is not yet full.
//!
//! Degenerate arithmetic (zero ranges, zero average loss) is not guarded:
//! `NaN`/`inf` flow into the final comparison, where `NaN > x` is false.

use thiserror::Error;

use crate::domain::Bar;

pub mod adx;
pub mod chaikin;
pub mod fibonacci;
pub mod ichimoku;
pub mod ma_trend;
pub mod macd;
pub mod obv;
pub mod parabolic_sar;
pub mod roc;
pub mod rsi;
pub mod series;
pub mod settings;

pub use adx::Adx;
pub use chaikin::Chaikin;
pub use fibonacci::Fibonacci;
pub use ichimoku::Ichimoku;
pub use ma_trend::MovingAverageTrend;
pub use macd::MacdCrossover;
pub use obv::OnBalanceVolume;
pub use parabolic_sar::ParabolicSar;
pub use roc::RateOfChange;
pub use rsi::Rsi;
pub use settings::{IndicatorSettings, SettingsError};

/// Default number of bars in the trailing "one week" window used by the
/// Fibonacci, Chaikin and Parabolic SAR indicators (five daily sessions).
pub const WEEK_BARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("{indicator} needs at least {required} bars, got {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },
}

/// A bullish/not-bullish trend detector.
///
/// Implementations are pure: the same bars always give the same verdict, and
/// the input is never modified.
pub trait TrendIndicator: Send + Sync {
    /// Human-readable name (e.g., "rsi_14", "ma_trend_5").
    fn name(&self) -> &str;

    /// Fewest bars `evaluate` accepts.
    fn min_bars(&self) -> usize;

    /// Verdict on the latest bar. Fails instead of guessing when the series is
    /// shorter than `min_bars()`.
    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError>;
}

/// Fail with `InsufficientData` when `bars` is shorter than `required`.
pub(crate) fn require_bars(
    indicator: &str,
    bars: &[Bar],
    required: usize,
) -> Result<(), IndicatorError> {
    if bars.len() < required {
        return Err(IndicatorError::InsufficientData {
            indicator: indicator.to_string(),
            required,
            available: bars.len(),
        });
    }
    Ok(())
}

/// The full ten-indicator library with default parameters, in scoring order.
pub fn default_library() -> Vec<Box<dyn TrendIndicator>> {
    IndicatorSettings::default().library()
}

/// Create synthetic daily bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let data: Vec<(f64, f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close, 1000.0)
        })
        .collect();
    make_ohlcv_bars(&data)
}

/// Create daily bars from explicit `(open, high, low, close, volume)` tuples.
#[cfg(test)]
pub fn make_ohlcv_bars(data: &[(f64, f64, f64, f64, f64)]) -> Vec<Bar> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| Bar {
            timestamp: base + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

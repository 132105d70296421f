//! Fibonacci Retracement.
//!
//! Over the trailing week window, support levels sit at
//! `high - (high - low) * level` for each configured ratio. Bullish when the
//! latest close is above at least one of them.

use super::series::{highs, lows};
use super::{require_bars, IndicatorError, TrendIndicator, WEEK_BARS};
use crate::domain::{series::tail, Bar};

/// Fewest bars the week window must hold.
pub const MIN_BARS: usize = 5;

#[derive(Debug, Clone)]
pub struct Fibonacci {
    levels: Vec<f64>,
    week_bars: usize,
    name: String,
}

impl Fibonacci {
    pub fn new(levels: Vec<f64>, week_bars: usize) -> Self {
        assert!(!levels.is_empty(), "Fibonacci needs at least one level");
        Self {
            levels,
            week_bars,
            name: "fibonacci".to_string(),
        }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new(vec![0.236, 0.382, 0.618], WEEK_BARS)
    }
}

/// Retracement prices measured down from `high`.
pub fn retracement_levels(high: f64, low: f64, levels: &[f64]) -> Vec<f64> {
    let range = high - low;
    levels.iter().map(|level| high - range * level).collect()
}

impl TrendIndicator for Fibonacci {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        MIN_BARS
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        let week = tail(bars, self.week_bars);
        require_bars(&self.name, week, MIN_BARS)?;

        let high = highs(week).into_iter().fold(f64::NEG_INFINITY, f64::max);
        let low = lows(week).into_iter().fold(f64::INFINITY, f64::min);
        let close = week[week.len() - 1].close;

        Ok(retracement_levels(high, low, &self.levels)
            .iter()
            .any(|&support| close > support))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_bars, DEFAULT_EPSILON};

    fn week_ending_at(close: f64) -> Vec<Bar> {
        make_ohlcv_bars(&[
            (100.0, 110.0, 95.0, 105.0, 1.0),
            (105.0, 120.0, 100.0, 115.0, 1.0),
            (115.0, 118.0, 100.0, 102.0, 1.0),
            (102.0, 108.0, 90.0, 95.0, 1.0),
            (95.0, 119.0, 91.0, close, 1.0),
        ])
    }

    #[test]
    fn levels_measured_from_the_high() {
        let levels = retracement_levels(120.0, 90.0, &[0.236, 0.382, 0.618]);
        assert_approx(levels[0], 120.0 - 30.0 * 0.236, DEFAULT_EPSILON);
        assert_approx(levels[1], 120.0 - 30.0 * 0.382, DEFAULT_EPSILON);
        assert_approx(levels[2], 120.0 - 30.0 * 0.618, DEFAULT_EPSILON);
    }

    #[test]
    fn close_above_deepest_level_is_bullish() {
        // Week range 90..120, deepest support 120 - 30 * 0.618 = 101.46
        assert!(Fibonacci::default().evaluate(&week_ending_at(102.0)).unwrap());
    }

    #[test]
    fn close_below_every_level_is_not_bullish() {
        assert!(!Fibonacci::default().evaluate(&week_ending_at(101.0)).unwrap());
    }

    #[test]
    fn only_the_trailing_week_counts() {
        let mut bars = make_ohlcv_bars(&[(100.0, 500.0, 10.0, 100.0, 1.0)]);
        let mut week = week_ending_at(102.0);
        for (i, bar) in week.iter_mut().enumerate() {
            bar.timestamp = bars[0].timestamp + chrono::Duration::days(i as i64 + 1);
        }
        bars.extend(week);
        // With the huge first bar excluded the verdict matches the plain week.
        assert!(Fibonacci::default().evaluate(&bars).unwrap());
        // Widening the window to include it pushes every level above the close.
        assert!(!Fibonacci::new(vec![0.236, 0.382, 0.618], 6)
            .evaluate(&bars)
            .unwrap());
    }

    #[test]
    fn flat_week_is_not_bullish() {
        // Zero range: every level collapses onto the close itself.
        let bars = make_ohlcv_bars(&[(10.0, 10.0, 10.0, 10.0, 1.0); 5]);
        assert!(!Fibonacci::default().evaluate(&bars).unwrap());
    }

    #[test]
    fn needs_five_bars_in_the_window() {
        let bars = week_ending_at(102.0);
        assert!(Fibonacci::default().evaluate(&bars[1..]).is_err());
    }
}

//! Parabolic SAR: iterative stop-and-reverse level over the trailing week.
//!
//! The SAR starts in an uptrend at the low of the window's *last* bar. Then,
//! walking forward from the second bar:
//! - uptrend, low above SAR: SAR moves `af` of the way toward the high, capped
//!   by the two previous lows
//! - uptrend, low at/below SAR: flip to downtrend, SAR = previous high
//! - downtrend mirrors the above with highs and lows swapped
//!
//! The acceleration factor grows by `af_step` on every bar up to `af_max`,
//! without resetting on a flip. Bullish when the latest close is above the
//! final SAR.

use super::{require_bars, IndicatorError, TrendIndicator, WEEK_BARS};
use crate::domain::{series::tail, Bar};

/// Fewest bars the week window must hold.
pub const MIN_BARS: usize = 5;

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    af_start: f64,
    af_step: f64,
    af_max: f64,
    week_bars: usize,
    name: String,
}

impl ParabolicSar {
    pub fn new(af_start: f64, af_step: f64, af_max: f64, week_bars: usize) -> Self {
        assert!(af_start > 0.0, "AF start must be > 0");
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_start, "AF max must be >= AF start");
        Self {
            af_start,
            af_step,
            af_max,
            week_bars,
            name: "psar".to_string(),
        }
    }

    /// Default parameters: 0.02, 0.02, 0.20 over one week.
    pub fn default_params() -> Self {
        Self::new(0.02, 0.02, 0.20, WEEK_BARS)
    }
}

impl Default for ParabolicSar {
    fn default() -> Self {
        Self::default_params()
    }
}

/// SAR after each bar; index 0 holds the seed (the last bar's low).
pub fn sar_path(bars: &[Bar], af_start: f64, af_step: f64, af_max: f64) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    let Some(last) = bars.last() else {
        return result;
    };

    let mut af = af_start;
    let mut sar = last.low;
    let mut trend_up = true;
    result[0] = sar;

    for i in 1..n {
        let bar = &bars[i];
        let prev = &bars[i - 1];
        let before_prev = if i >= 2 { Some(&bars[i - 2]) } else { None };

        if trend_up {
            if bar.low > sar {
                sar += af * (bar.high - sar);
                sar = sar.min(prev.low);
                if let Some(b) = before_prev {
                    sar = sar.min(b.low);
                }
            } else {
                trend_up = false;
                sar = prev.high;
            }
        } else if bar.high < sar {
            sar += af * (bar.low - sar);
            sar = sar.max(prev.high);
            if let Some(b) = before_prev {
                sar = sar.max(b.high);
            }
        } else {
            trend_up = true;
            sar = prev.low;
        }

        af = (af + af_step).min(af_max);
        result[i] = sar;
    }

    result
}

impl TrendIndicator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        MIN_BARS
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        let week = tail(bars, self.week_bars);
        require_bars(&self.name, week, MIN_BARS)?;
        let path = sar_path(week, self.af_start, self.af_step, self.af_max);
        Ok(week[week.len() - 1].close > path[path.len() - 1])
    }
}

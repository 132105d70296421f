//! Chaikin Oscillator.
//!
//! Money-Flow-Multiplier from the typical price:
//!   MFM = ((tp - low) - (high - tp)) / (high - low)
//! Accumulation/Distribution line: ADL = cumulative sum of MFM * volume.
//! Oscillator = SMA(ADL, window) - SMA(ADL, window) shifted `window` bars.
//!
//! Evaluated over the trailing week window. The oscillator's first defined
//! value is at index 2 * window - 1, so a window that short still passes the
//! minimum-bar check but yields an undefined, non-bullish verdict.

use super::series::{cumsum_skip_nan, rolling_mean, shift};
use super::{require_bars, IndicatorError, TrendIndicator, WEEK_BARS};
use crate::domain::{series::tail, Bar};

#[derive(Debug, Clone)]
pub struct Chaikin {
    window: usize,
    week_bars: usize,
    name: String,
}

impl Chaikin {
    pub fn new(window: usize, week_bars: usize) -> Self {
        assert!(window >= 1, "Chaikin window must be >= 1");
        Self {
            window,
            week_bars,
            name: format!("chaikin_{window}"),
        }
    }
}

impl Default for Chaikin {
    fn default() -> Self {
        Self::new(3, WEEK_BARS)
    }
}

/// Money-Flow-Multiplier per bar. Undefined (`NaN`) or infinite when
/// high == low.
pub fn money_flow_multiplier(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .map(|b| {
            let tp = b.typical_price();
            ((tp - b.low) - (b.high - tp)) / (b.high - b.low)
        })
        .collect()
}

pub fn accumulation_distribution(bars: &[Bar]) -> Vec<f64> {
    let flow: Vec<f64> = money_flow_multiplier(bars)
        .iter()
        .zip(bars)
        .map(|(mfm, b)| mfm * b.volume)
        .collect();
    cumsum_skip_nan(&flow)
}

pub fn chaikin_series(bars: &[Bar], window: usize) -> Vec<f64> {
    let adl_mean = rolling_mean(&accumulation_distribution(bars), window);
    let lagged = shift(&adl_mean, window);
    adl_mean.iter().zip(&lagged).map(|(a, b)| a - b).collect()
}

impl TrendIndicator for Chaikin {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.window + 1
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        let week = tail(bars, self.week_bars);
        require_bars(&self.name, week, self.window + 1)?;
        let osc = chaikin_series(week, self.window);
        Ok(osc[osc.len() - 1] > 0.0)
    }
}

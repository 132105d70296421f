//! Relative Strength Index (RSI).
//!
//! RS = mean(gains, period) / mean(losses, period), both as simple rolling means.
//! RSI = 100 - 100 / (1 + RS).
//! The first price change is undefined and counts as neither gain nor loss, so
//! `period` bars are enough for one RSI value.
//!
//! Zero average loss is not special-cased: RS becomes `inf` (RSI = 100) or
//! `NaN` when gains are zero too, and a `NaN` RSI never clears the threshold.

use super::series::{closes, diff, rolling_mean};
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    threshold: f64,
    name: String,
}

impl Rsi {
    pub fn new(period: usize, threshold: f64) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            threshold,
            name: format!("rsi_{period}"),
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14, 50.0)
    }
}

/// RSI line for a close series.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let changes = diff(closes, 1);
    let gains: Vec<f64> = changes
        .iter()
        .map(|&ch| if ch > 0.0 { ch } else { 0.0 })
        .collect();
    let losses: Vec<f64> = changes
        .iter()
        .map(|&ch| if ch < 0.0 { -ch } else { 0.0 })
        .collect();

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| 100.0 - 100.0 / (1.0 + g / l))
        .collect()
}

impl TrendIndicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.period)?;
        let rsi = rsi_series(&closes(bars), self.period);
        Ok(rsi[rsi.len() - 1] > self.threshold)
    }
}

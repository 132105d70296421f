//! On-Balance-Volume Trend.
//!
//! Volume counts toward the running total on bars whose close is higher than
//! the close `window` bars earlier; all other bars contribute nothing. Bullish
//! when the latest cumulative value exceeds the previous one, i.e. the newest
//! bar added buying volume.

use super::series::{cumsum_skip_nan, last_two};
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct OnBalanceVolume {
    window: usize,
    name: String,
}

impl OnBalanceVolume {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "OBV window must be >= 1");
        Self {
            window,
            name: format!("obv_{window}"),
        }
    }
}

impl Default for OnBalanceVolume {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Cumulative positive volume flow, comparing each close with the close
/// `window` bars earlier.
pub fn obv_series(bars: &[Bar], window: usize) -> Vec<f64> {
    let flow: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i >= window && bar.close > bars[i - window].close {
                bar.volume
            } else {
                0.0
            }
        })
        .collect();
    cumsum_skip_nan(&flow)
}

impl TrendIndicator for OnBalanceVolume {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.window + 1
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.window + 1)?;
        let obv = obv_series(bars, self.window);
        Ok(match last_two(&obv) {
            Some((prev, last)) => last > prev,
            None => false,
        })
    }
}

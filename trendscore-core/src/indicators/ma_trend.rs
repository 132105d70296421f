//! Moving-Average Trend.
//!
//! Bullish when the last close sits above the simple moving average of the
//! last `window` closes. Minimum bars: window.

use super::series::{closes, rolling_mean};
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct MovingAverageTrend {
    window: usize,
    name: String,
}

impl MovingAverageTrend {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "MA window must be >= 1");
        Self {
            window,
            name: format!("ma_trend_{window}"),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverageTrend {
    fn default() -> Self {
        Self::new(5)
    }
}

impl TrendIndicator for MovingAverageTrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.window
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.window)?;
        let closes = closes(bars);
        let sma = rolling_mean(&closes, self.window);
        let last = closes.len() - 1;
        Ok(closes[last] > sma[last])
    }
}

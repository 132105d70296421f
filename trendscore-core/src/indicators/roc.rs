//! Rate of Change (ROC).
//!
//! ROC[t] = (close[t] / close[t-period] - 1) * 100
//! Bullish when the latest ROC is positive. With exactly `period` bars there is
//! no reference close yet, the ROC is undefined and the verdict is false.

use super::series::closes;
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct RateOfChange {
    period: usize,
    name: String,
}

impl RateOfChange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self {
            period,
            name: format!("roc_{period}"),
        }
    }
}

impl Default for RateOfChange {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Percentage change of each close against the close `period` bars earlier.
pub fn roc_series(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    for i in period..n {
        result[i] = (closes[i] / closes[i - period] - 1.0) * 100.0;
    }
    result
}

impl TrendIndicator for RateOfChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.period)?;
        let roc = roc_series(&closes(bars), self.period);
        Ok(roc[roc.len() - 1] > 0.0)
    }
}

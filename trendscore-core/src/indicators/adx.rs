//! ADX: Average Directional Index, in the stacked-rolling-mean form this
//! scorer has always used (not Wilder's textbook smoothing).
//!
//! Steps:
//! 1. True Range; +DM = max(high - prev_high, 0); -DM = max(prev_low - low, 0)
//! 2. Rolling means of TR, +DM and -DM over `period`
//! 3. DMI = 100 * |s+DM - s-DM| / (s+DM + s-DM)
//! 4. ATR = rolling mean of smoothed TR
//! 5. DX = 100 * mean(ATR) / (DMI + ATR)
//! 6. ADX = rolling mean of DX
//!
//! First defined ADX value: index 4 * (period - 1).
//! Verdict: ADX rising against the previous bar and above `threshold`.

use super::series::{last_two, rolling_mean};
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    threshold: f64,
    name: String,
}

impl Adx {
    pub fn new(period: usize, threshold: f64) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            threshold,
            name: format!("adx_{period}"),
        }
    }
}

impl Default for Adx {
    fn default() -> Self {
        Self::new(14, 25.0)
    }
}

/// True Range. The first bar has no previous close, so TR[0] = high - low.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let hl = bar.high - bar.low;
            if i == 0 {
                return hl;
            }
            let prev_close = bars[i - 1].close;
            hl.max((bar.high - prev_close).abs())
                .max((bar.low - prev_close).abs())
        })
        .collect()
}

/// Positive and negative directional movement. Index 0 is 0 for both.
pub fn directional_movement(bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
    let n = bars.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    for i in 1..n {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        if up > 0.0 {
            plus_dm[i] = up;
        }
        if down > 0.0 {
            minus_dm[i] = down;
        }
    }

    (plus_dm, minus_dm)
}

pub fn adx_series(bars: &[Bar], period: usize) -> Vec<f64> {
    let tr = true_range(bars);
    let (plus_dm, minus_dm) = directional_movement(bars);

    let smooth_tr = rolling_mean(&tr, period);
    let smooth_plus = rolling_mean(&plus_dm, period);
    let smooth_minus = rolling_mean(&minus_dm, period);

    let dmi: Vec<f64> = smooth_plus
        .iter()
        .zip(&smooth_minus)
        .map(|(&p, &m)| 100.0 * (p - m).abs() / (p + m))
        .collect();
    let atr = rolling_mean(&smooth_tr, period);
    let atr_mean = rolling_mean(&atr, period);

    let dx: Vec<f64> = atr_mean
        .iter()
        .zip(dmi.iter().zip(&atr))
        .map(|(&am, (&d, &a))| 100.0 * am / (d + a))
        .collect();

    rolling_mean(&dx, period)
}

impl TrendIndicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.period + 1)?;
        let adx = adx_series(bars, self.period);
        Ok(match last_two(&adx) {
            Some((prev, last)) => last > prev && last > self.threshold,
            None => false,
        })
    }
}

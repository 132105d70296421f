//! MACD Crossover.
//!
//! MACD line = EMA(fast) - EMA(slow) of closes; signal = EMA(signal) of the MACD
//! line. All EMAs are unadjusted and seeded with the first value.
//!
//! Bullish only on the bar where MACD crosses from at-or-below the signal line
//! to above it. Being above without a fresh crossover is not a vote.

use super::series::{closes, ewm, last_two};
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct MacdCrossover {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

/// MACD and signal lines, index-aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdCrossover {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD spans must be >= 1");
        assert!(slow > fast, "MACD slow span must exceed fast span");
        Self {
            fast,
            slow,
            signal,
            name: format!("macd_{fast}_{slow}_{signal}"),
        }
    }
}

impl Default for MacdCrossover {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

pub fn macd_lines(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let ema_fast = ewm(closes, fast);
    let ema_slow = ewm(closes, slow);
    let macd: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal = ewm(&macd, signal);
    MacdLines { macd, signal }
}

impl TrendIndicator for MacdCrossover {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.slow
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.slow)?;
        let lines = macd_lines(&closes(bars), self.fast, self.slow, self.signal);
        let crossed = match (last_two(&lines.macd), last_two(&lines.signal)) {
            (Some((macd_prev, macd_last)), Some((sig_prev, sig_last))) => {
                macd_last > sig_last && macd_prev <= sig_prev
            }
            _ => false,
        };
        Ok(crossed)
    }
}

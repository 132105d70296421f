//! Ichimoku Cloud.
//!
//! Conversion = midpoint of the 9-bar high/low, base = 26-bar midpoint,
//! leading span A = (conversion + base) / 2, leading span B = 52-bar midpoint.
//! Spans are read on the latest bar without the forward displacement.
//! Bullish when the close is above both spans and span A is above span B.

use super::series::{closes, highs, lows, rolling_max, rolling_min};
use super::{require_bars, IndicatorError, TrendIndicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ichimoku {
    conversion: usize,
    base: usize,
    span_b: usize,
    name: String,
}

/// Ichimoku lines, index-aligned with the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct IchimokuLines {
    pub conversion: Vec<f64>,
    pub base: Vec<f64>,
    pub span_a: Vec<f64>,
    pub span_b: Vec<f64>,
}

impl Ichimoku {
    pub fn new(conversion: usize, base: usize, span_b: usize) -> Self {
        assert!(
            conversion >= 1 && base >= conversion && span_b >= base,
            "Ichimoku periods must satisfy 1 <= conversion <= base <= span_b"
        );
        Self {
            conversion,
            base,
            span_b,
            name: format!("ichimoku_{conversion}_{base}_{span_b}"),
        }
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(9, 26, 52)
    }
}

fn midpoint(highs: &[f64], lows: &[f64], window: usize) -> Vec<f64> {
    rolling_max(highs, window)
        .iter()
        .zip(rolling_min(lows, window))
        .map(|(h, l)| (h + l) / 2.0)
        .collect()
}

pub fn ichimoku_lines(bars: &[Bar], conversion: usize, base: usize, span_b: usize) -> IchimokuLines {
    let highs = highs(bars);
    let lows = lows(bars);
    let conversion = midpoint(&highs, &lows, conversion);
    let base = midpoint(&highs, &lows, base);
    let span_a = conversion
        .iter()
        .zip(&base)
        .map(|(c, b)| (c + b) / 2.0)
        .collect();
    let span_b = midpoint(&highs, &lows, span_b);
    IchimokuLines {
        conversion,
        base,
        span_a,
        span_b,
    }
}

impl TrendIndicator for Ichimoku {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_bars(&self) -> usize {
        self.span_b
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<bool, IndicatorError> {
        require_bars(&self.name, bars, self.span_b)?;
        let lines = ichimoku_lines(bars, self.conversion, self.base, self.span_b);
        let last = bars.len() - 1;
        let close = closes(bars)[last];
        let (a, b) = (lines.span_a[last], lines.span_b[last]);
        Ok(close > a && close > b && a > b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn ramp(n: usize, start: f64, step: f64) -> Vec<f64> {
        (0..n).map(|i| start + i as f64 * step).collect()
    }

    #[test]
    fn known_lines_on_a_ramp() {
        // make_bars on a rising ramp: high = close + 1, low = prev close - 1
        let bars = make_bars(&ramp(60, 100.0, 1.0));
        let lines = ichimoku_lines(&bars, 9, 26, 52);
        // conversion at 59: (160 + 149) / 2
        assert_approx(lines.conversion[59], 154.5, DEFAULT_EPSILON);
        // base at 59: (160 + 132) / 2
        assert_approx(lines.base[59], 146.0, DEFAULT_EPSILON);
        assert_approx(lines.span_a[59], 150.25, DEFAULT_EPSILON);
        // span B at 59: (160 + 106) / 2
        assert_approx(lines.span_b[59], 133.0, DEFAULT_EPSILON);
        assert!(lines.span_b[50].is_nan());
    }

    #[test]
    fn uptrend_above_green_cloud_is_bullish() {
        let bars = make_bars(&ramp(60, 100.0, 1.0));
        assert!(Ichimoku::default().evaluate(&bars).unwrap());
    }

    #[test]
    fn downtrend_is_not_bullish() {
        let bars = make_bars(&ramp(60, 200.0, -1.0));
        assert!(!Ichimoku::default().evaluate(&bars).unwrap());
    }

    #[test]
    fn needs_fifty_two_bars() {
        let bars = make_bars(&ramp(51, 100.0, 1.0));
        assert!(Ichimoku::default().evaluate(&bars).is_err());
        let bars = make_bars(&ramp(52, 100.0, 1.0));
        assert!(Ichimoku::default().evaluate(&bars).is_ok());
    }
}

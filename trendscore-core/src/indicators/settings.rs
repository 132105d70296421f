//! Indicator parameters as they appear in a scan config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Interval;

use super::{
    Adx, Chaikin, Fibonacci, Ichimoku, MacdCrossover, MovingAverageTrend, OnBalanceVolume,
    ParabolicSar, RateOfChange, Rsi, TrendIndicator, WEEK_BARS,
};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid indicator setting `{field}`: {reason}")]
pub struct SettingsError {
    pub field: &'static str,
    pub reason: String,
}

/// Tunable parameters of the ten-indicator library. Fixed-span indicators
/// (MACD 12/26/9, Ichimoku 9/26/52, SAR acceleration) are not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorSettings {
    pub ma_window: usize,
    pub rsi_period: usize,
    pub rsi_threshold: f64,
    pub roc_period: usize,
    pub adx_period: usize,
    pub adx_threshold: f64,
    pub obv_window: usize,
    pub fibonacci_levels: Vec<f64>,
    pub chaikin_window: usize,
    /// Daily sessions in the trailing window read by Fibonacci, Chaikin and
    /// Parabolic SAR. See [`for_interval`](Self::for_interval).
    pub week_bars: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            ma_window: 5,
            rsi_period: 14,
            rsi_threshold: 50.0,
            roc_period: 5,
            adx_period: 14,
            adx_threshold: 25.0,
            obv_window: 5,
            fibonacci_levels: vec![0.236, 0.382, 0.618],
            chaikin_window: 3,
            week_bars: WEEK_BARS,
        }
    }
}

/// Regular-session length; intraday week windows span this many minutes per day.
const SESSION_MINUTES: usize = 390;

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError {
        field,
        reason: reason.into(),
    }
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let windows = [
            ("ma_window", self.ma_window),
            ("rsi_period", self.rsi_period),
            ("roc_period", self.roc_period),
            ("adx_period", self.adx_period),
            ("obv_window", self.obv_window),
            ("chaikin_window", self.chaikin_window),
        ];
        for (field, value) in windows {
            if value == 0 {
                return Err(invalid(field, "must be >= 1"));
            }
        }

        if !(0.0..=100.0).contains(&self.rsi_threshold) {
            return Err(invalid("rsi_threshold", "must be within 0..=100"));
        }
        if !self.adx_threshold.is_finite() || self.adx_threshold < 0.0 {
            return Err(invalid("adx_threshold", "must be a finite value >= 0"));
        }
        if self.fibonacci_levels.is_empty() {
            return Err(invalid("fibonacci_levels", "needs at least one level"));
        }
        if let Some(level) = self
            .fibonacci_levels
            .iter()
            .find(|l| !(0.0..=1.0).contains(*l))
        {
            return Err(invalid(
                "fibonacci_levels",
                format!("level {level} is outside 0..=1"),
            ));
        }
        if self.week_bars < super::fibonacci::MIN_BARS {
            return Err(invalid(
                "week_bars",
                format!("must be >= {}", super::fibonacci::MIN_BARS),
            ));
        }

        if self.chaikin_window + 1 > self.week_bars {
            return Err(invalid(
                "chaikin_window",
                format!("window + 1 must fit in week_bars ({})", self.week_bars),
            ));
        }

        Ok(())
    }

    /// Build the ten indicators in scoring order.
    ///
    /// Call [`validate`](Self::validate) first; constructors assert on zero
    /// windows.
    pub fn library(&self) -> Vec<Box<dyn TrendIndicator>> {
        vec![
            Box::new(MovingAverageTrend::new(self.ma_window)),
            Box::new(Rsi::new(self.rsi_period, self.rsi_threshold)),
            Box::new(MacdCrossover::default()),
            Box::new(RateOfChange::new(self.roc_period)),
            Box::new(Adx::new(self.adx_period, self.adx_threshold)),
            Box::new(OnBalanceVolume::new(self.obv_window)),
            Box::new(Ichimoku::default()),
            Box::new(Fibonacci::new(self.fibonacci_levels.clone(), self.week_bars)),
            Box::new(Chaikin::new(self.chaikin_window, self.week_bars)),
            Box::new(ParabolicSar::new(0.02, 0.02, 0.20, self.week_bars)),
        ]
    }

    /// These settings with `week_bars` converted from sessions to bars of
    /// `interval`. A 5m week is `week_bars * 78` bars; weekly and monthly
    /// bars cannot hold a one-week window.
    pub fn for_interval(&self, interval: Interval) -> Result<Self, SettingsError> {
        let week_bars = match interval.intraday_minutes() {
            Some(minutes) => self.week_bars * SESSION_MINUTES.div_ceil(minutes as usize),
            None if interval == Interval::Day1 => self.week_bars,
            None => {
                return Err(invalid(
                    "week_bars",
                    format!("a week window needs daily or intraday bars, got {interval}"),
                ))
            }
        };
        Ok(Self {
            week_bars,
            ..self.clone()
        })
    }
}

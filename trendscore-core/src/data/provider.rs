//! Bar series provider trait and structured error types.
//!
//! The BarProvider trait abstracts over data sources (Yahoo Finance, synthetic
//! random walks, in-memory fixtures) so scans can swap implementations and
//! tests can run without a network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BarSeries, SeriesError};

/// Structured error types for data operations.
///
/// Every variant means "no usable bars for this symbol right now"; callers
/// treat them per symbol and keep going.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no bars returned for {symbol}")]
    NoData { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("invalid bar series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("data error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseRangeError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// How far back a history request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "5d")]
    Day5,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "1mo")]
    Month1,
    #[serde(rename = "60d")]
    Day60,
    #[serde(rename = "3mo")]
    Month3,
    #[serde(rename = "6mo")]
    Month6,
    #[serde(rename = "1y")]
    Year1,
    #[serde(rename = "2y")]
    Year2,
    #[serde(rename = "5y")]
    Year5,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Period; 11] = [
        Period::Day1,
        Period::Day5,
        Period::Day7,
        Period::Month1,
        Period::Day60,
        Period::Month3,
        Period::Month6,
        Period::Year1,
        Period::Year2,
        Period::Year5,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day1 => "1d",
            Period::Day5 => "5d",
            Period::Day7 => "7d",
            Period::Month1 => "1mo",
            Period::Day60 => "60d",
            Period::Month3 => "3mo",
            Period::Month6 => "6mo",
            Period::Year1 => "1y",
            Period::Year2 => "2y",
            Period::Year5 => "5y",
            Period::Max => "max",
        }
    }

    /// Approximate trading sessions covered; `None` for the full history.
    pub fn trading_days(&self) -> Option<u32> {
        match self {
            Period::Day1 => Some(1),
            Period::Day5 => Some(5),
            Period::Day7 => Some(5),
            Period::Month1 => Some(21),
            Period::Day60 => Some(42),
            Period::Month3 => Some(63),
            Period::Month6 => Some(126),
            Period::Year1 => Some(252),
            Period::Year2 => Some(504),
            Period::Year5 => Some(1260),
            Period::Max => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseRangeError {
                kind: "period",
                value: s.to_string(),
                expected: "1d, 5d, 7d, 1mo, 60d, 3mo, 6mo, 1y, 2y, 5y, max",
            })
    }
}

/// Width of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "2m")]
    Minute2,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "60m")]
    Minute60,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1wk")]
    Week1,
    #[serde(rename = "1mo")]
    Month1,
}

impl Interval {
    pub const ALL: [Interval; 9] = [
        Interval::Minute1,
        Interval::Minute2,
        Interval::Minute5,
        Interval::Minute15,
        Interval::Minute30,
        Interval::Minute60,
        Interval::Day1,
        Interval::Week1,
        Interval::Month1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute2 => "2m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Day1 => "1d",
            Interval::Week1 => "1wk",
            Interval::Month1 => "1mo",
        }
    }

    /// Bar width in minutes for intraday intervals.
    pub fn intraday_minutes(&self) -> Option<u32> {
        match self {
            Interval::Minute1 => Some(1),
            Interval::Minute2 => Some(2),
            Interval::Minute5 => Some(5),
            Interval::Minute15 => Some(15),
            Interval::Minute30 => Some(30),
            Interval::Minute60 => Some(60),
            Interval::Day1 | Interval::Week1 | Interval::Month1 => None,
        }
    }

    pub fn is_intraday(&self) -> bool {
        self.intraday_minutes().is_some()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| ParseRangeError {
                kind: "interval",
                value: s.to_string(),
                expected: "1m, 2m, 5m, 15m, 30m, 60m, 1d, 1wk, 1mo",
            })
    }
}

/// Same-day opening and latest price for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenClose {
    pub open: f64,
    pub close: f64,
}

impl OpenClose {
    /// (close - open) / open * 100
    pub fn percent_change(&self) -> f64 {
        (self.close - self.open) / self.open * 100.0
    }
}

/// Trait for bar series providers (Yahoo Finance, synthetic, in-memory).
///
/// Implementations handle the specifics of fetching data from one source.
/// Calls are blocking; a failure is returned, never retried by the caller.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the bar history for a symbol.
    fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<BarSeries, DataError>;

    /// Today's open and latest close, from one-minute bars of the current session.
    fn fetch_intraday_open_close(&self, symbol: &str) -> Result<OpenClose, DataError> {
        let session = self.fetch_history(symbol, Period::Day1, Interval::Minute1)?;
        match (session.first(), session.last()) {
            (Some(first), Some(last)) => Ok(OpenClose {
                open: first.open,
                close: last.close,
            }),
            _ => Err(DataError::NoData {
                symbol: symbol.to_string(),
            }),
        }
    }
}

//! In-memory provider backed by prebuilt series.
//!
//! Serves the same series regardless of period and interval. Used for
//! fixtures, replaying saved data, and embedding the scorer in other tools.

use std::collections::HashMap;

use super::provider::{BarProvider, DataError, Interval, OpenClose, Period};
use crate::domain::BarSeries;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    history: HashMap<String, BarSeries>,
    sessions: HashMap<String, OpenClose>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: BarSeries) -> Self {
        self.insert_series(series);
        self
    }

    pub fn with_open_close(mut self, symbol: impl Into<String>, open_close: OpenClose) -> Self {
        self.sessions.insert(symbol.into(), open_close);
        self
    }

    pub fn insert_series(&mut self, series: BarSeries) {
        self.history.insert(series.symbol().to_string(), series);
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.history.keys().map(String::as_str)
    }
}

impl BarProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn fetch_history(
        &self,
        symbol: &str,
        _period: Period,
        _interval: Interval,
    ) -> Result<BarSeries, DataError> {
        self.history
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Registered session prices win; otherwise the stored series' first open and last close.
    fn fetch_intraday_open_close(&self, symbol: &str) -> Result<OpenClose, DataError> {
        if let Some(open_close) = self.sessions.get(symbol) {
            return Ok(*open_close);
        }
        let series = self.fetch_history(symbol, Period::Day1, Interval::Minute1)?;
        match (series.first(), series.last()) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::{TimeZone, Utc};

    fn series(symbol: &str) -> BarSeries {
        let bars = (0..3)
            .map(|i| Bar {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 4 + i, 20, 0, 0).unwrap(),
                open: 10.0 + f64::from(i),
                high: 12.0 + f64::from(i),
                low: 9.0 + f64::from(i),
                close: 11.0 + f64::from(i),
                volume: 100.0,
            })
            .collect();
        BarSeries::new(symbol, bars).unwrap()
    }

    #[test]
    fn unknown_symbol_is_not_found() {
        let p = InMemoryProvider::new();
        let err = p
            .fetch_history("AAPL", Period::Month1, Interval::Day1)
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn open_close_falls_back_to_series() {
        let p = InMemoryProvider::new().with_series(series("AAPL"));
        let oc = p.fetch_intraday_open_close("AAPL").unwrap();
        assert_eq!(oc, OpenClose { open: 10.0, close: 13.0 });
    }

    #[test]
    fn registered_session_wins() {
        let oc = OpenClose {
            open: 1.0,
            close: 2.0,
        };
        let p = InMemoryProvider::new()
            .with_series(series("AAPL"))
            .with_open_close("AAPL", oc);
        assert_eq!(p.fetch_intraday_open_close("AAPL").unwrap(), oc);
    }

    #[test]
    fn empty_series_has_no_session() {
        let p = InMemoryProvider::new().with_series(BarSeries::new("EMPTY", vec![]).unwrap());
        let err = p.fetch_intraday_open_close("EMPTY").unwrap_err();
        assert!(matches!(err, DataError::NoData { .. }));
    }
}

//! Synthetic bar provider for offline runs and tests.
//!
//! Produces a seeded random walk from a starting price of 100.0. The RNG seed
//! is the blake3 hash of the symbol and the provider seed, so the same
//! (symbol, seed) pair yields the same bars on every machine.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{BarProvider, DataError, Interval, Period};
use crate::domain::{Bar, BarSeries};

/// 2024-01-02 14:30 UTC, a Tuesday at the US cash open.
const ANCHOR_TIMESTAMP: i64 = 1_704_205_800;
const SESSION_MINUTES: u32 = 390;
/// Sessions generated for `Period::Max`.
const MAX_SESSIONS: u32 = 2520;
/// Yahoo serves at most 60 days of intraday bars; mirror that cap.
const MAX_INTRADAY_SESSIONS: u32 = 60;

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rng_for(&self, symbol: &str) -> StdRng {
        let mut hasher = blake3::Hasher::new();
        hasher.update(symbol.as_bytes());
        hasher.update(&self.seed.to_le_bytes());
        StdRng::from_seed(*hasher.finalize().as_bytes())
    }
}

/// Number of bars a (period, interval) request spans.
pub fn bar_count(period: Period, interval: Interval) -> usize {
    let sessions = period.trading_days().unwrap_or(MAX_SESSIONS);
    let count = match interval.intraday_minutes() {
        Some(minutes) => sessions.min(MAX_INTRADAY_SESSIONS) * (SESSION_MINUTES / minutes).max(1),
        None => match interval {
            Interval::Week1 => sessions / 5,
            Interval::Month1 => sessions / 21,
            _ => sessions,
        },
    };
    count.max(1) as usize
}

fn next_weekday(ts: DateTime<Utc>) -> DateTime<Utc> {
    let mut next = ts + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next += Duration::days(1);
    }
    next
}

fn timestamps(interval: Interval, count: usize) -> Vec<DateTime<Utc>> {
    let mut out = Vec::with_capacity(count);
    let mut session = DateTime::from_timestamp(ANCHOR_TIMESTAMP, 0).unwrap_or_default();

    match interval.intraday_minutes() {
        Some(minutes) => {
            let per_session = (SESSION_MINUTES / minutes).max(1);
            while out.len() < count {
                for k in 0..per_session {
                    if out.len() == count {
                        break;
                    }
                    out.push(session + Duration::minutes(i64::from(k * minutes)));
                }
                session = next_weekday(session);
            }
        }
        None => {
            for _ in 0..count {
                out.push(session);
                session = match interval {
                    Interval::Week1 => session + Duration::days(7),
                    Interval::Month1 => session + Duration::days(30),
                    _ => next_weekday(session),
                };
            }
        }
    }
    out
}

impl BarProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<BarSeries, DataError> {
        let mut rng = self.rng_for(symbol);
        let volatility = if interval.is_intraday() { 0.002 } else { 0.02 };
        // Per-symbol bias so a synthetic universe has both winners and losers.
        let drift = rng.gen_range(-0.5..0.5) * volatility;

        let mut price = 100.0_f64;
        let bars: Vec<Bar> = timestamps(interval, bar_count(period, interval))
            .into_iter()
            .map(|timestamp| {
                let ret: f64 = drift + rng.gen_range(-volatility..volatility);
                let open = price;
                let close = price * (1.0 + ret);
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..volatility / 2.0));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..volatility / 2.0));
                let volume = rng.gen_range(500_000..5_000_000u64) as f64;
                price = close;
                Bar {
                    timestamp,
                    open,
                    high,
                    low,
                    close,
                    volume,
                }
            })
            .collect();

        tracing::trace!(symbol, bars = bars.len(), seed = self.seed, "generated synthetic bars");
        Ok(BarSeries::new(symbol, bars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_symbol_and_seed() {
        let p = SyntheticProvider::new(7);
        let a = p.fetch_history("AAPL", Period::Month3, Interval::Day1).unwrap();
        let b = p.fetch_history("AAPL", Period::Month3, Interval::Day1).unwrap();
        assert_eq!(a, b);

        let other_symbol = p.fetch_history("MSFT", Period::Month3, Interval::Day1).unwrap();
        assert_ne!(a.bars(), other_symbol.bars());

        let other_seed = SyntheticProvider::new(8)
            .fetch_history("AAPL", Period::Month3, Interval::Day1)
            .unwrap();
        assert_ne!(a.bars(), other_seed.bars());
    }

    #[test]
    fn bar_counts_follow_period_and_interval() {
        assert_eq!(bar_count(Period::Month3, Interval::Day1), 63);
        assert_eq!(bar_count(Period::Day1, Interval::Minute1), 390);
        assert_eq!(bar_count(Period::Day5, Interval::Minute5), 5 * 78);
        assert_eq!(bar_count(Period::Year1, Interval::Week1), 50);
        assert_eq!(bar_count(Period::Day1, Interval::Month1), 1);
    }

    #[test]
    fn daily_bars_skip_weekends() {
        let series = SyntheticProvider::new(1)
            .fetch_history("SPY", Period::Month1, Interval::Day1)
            .unwrap();
        assert!(series
            .bars()
            .iter()
            .all(|b| !matches!(b.timestamp.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn bars_are_sane() {
        let series = SyntheticProvider::new(3)
            .fetch_history("QQQ", Period::Day5, Interval::Minute15)
            .unwrap();
        for b in series.bars() {
            assert!(!b.is_void());
            assert!(b.low <= b.open.min(b.close) && b.high >= b.open.max(b.close), "{b:?}");
            assert!(b.low > 0.0);
        }
    }

    #[test]
    fn intraday_open_close_spans_one_session() {
        let p = SyntheticProvider::new(11);
        let session = p.fetch_history("NVDA", Period::Day1, Interval::Minute1).unwrap();
        let oc = p.fetch_intraday_open_close("NVDA").unwrap();
        assert_eq!(oc.open, session.first().unwrap().open);
        assert_eq!(oc.close, session.last().unwrap().close);
    }
}

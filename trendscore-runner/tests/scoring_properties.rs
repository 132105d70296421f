//! Property tests for the composite scorer and the ranking.
//!
//! 1. Score is the exact count of bullish verdicts
//! 2. Ranking is a stable descending sort of the score table

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use trendscore_core::domain::{Bar, BarSeries};
use trendscore_core::indicators::{IndicatorError, TrendIndicator};
use trendscore_runner::{rank, Scorer, TrendScores};

struct Vote(bool, String);

impl TrendIndicator for Vote {
    fn name(&self) -> &str {
        &self.1
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn evaluate(&self, _bars: &[Bar]) -> Result<bool, IndicatorError> {
        Ok(self.0)
    }
}

fn scorer(votes: &[bool]) -> Scorer {
    Scorer::with_indicators(
        votes
            .iter()
            .enumerate()
            .map(|(i, &v)| Box::new(Vote(v, format!("mock_{i}"))) as Box<dyn TrendIndicator>)
            .collect(),
    )
}

fn series() -> BarSeries {
    let bar = Bar {
        timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 20, 0, 0).unwrap(),
        open: 1.0,
        high: 1.0,
        low: 1.0,
        close: 1.0,
        volume: 0.0,
    };
    let bars = (0..3)
        .map(|i| Bar {
            timestamp: bar.timestamp + Duration::days(i),
            ..bar
        })
        .collect();
    BarSeries::new("MOCK", bars).unwrap()
}

#[test]
fn all_bullish_scores_ten() {
    let card = scorer(&[true; 10]).score(&series()).unwrap();
    assert_eq!(card.score, 10);
    assert_eq!(card.symbol, "MOCK");
}

#[test]
fn none_bullish_scores_zero() {
    let card = scorer(&[false; 10]).score(&series()).unwrap();
    assert_eq!(card.score, 0);
    assert_eq!(card.verdicts.len(), 10);
}

#[test]
fn documented_tie_example() {
    let scores: TrendScores = [("A", 3), ("B", 5), ("C", 3)].into_iter().collect();
    let order: Vec<String> = rank(&scores).into_iter().map(|r| r.symbol).collect();
    assert_eq!(order, ["B", "A", "C"]);
}

proptest! {
    #[test]
    fn score_is_count_of_true(votes in prop::collection::vec(any::<bool>(), 10)) {
        let card = scorer(&votes).score(&series()).unwrap();
        prop_assert_eq!(card.score as usize, votes.iter().filter(|v| **v).count());
        let recorded: Vec<bool> = card.verdicts.iter().map(|v| v.bullish).collect();
        prop_assert_eq!(recorded, votes);
    }

    #[test]
    fn ranking_is_stable_descending(scores in prop::collection::vec(0u32..=10, 0..40)) {
        let table: TrendScores = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (format!("S{i:02}"), s))
            .collect();
        let ranked = rank(&table);

        prop_assert_eq!(ranked.len(), scores.len());
        for (i, pair) in ranked.windows(2).enumerate() {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                // Symbol names encode insertion order.
                prop_assert!(pair[0].symbol < pair[1].symbol);
            }
            prop_assert_eq!(pair[0].rank, i + 1);
        }
    }
}

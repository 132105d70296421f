//! Score table and stable descending ranking.
//!
//! `TrendScores` keeps symbols in the order they were first inserted. The
//! ranking sorts by score, best first; equal scores keep that order, so
//! a tie between two symbols always resolves to whichever was scanned first.

use serde::{Deserialize, Serialize};

/// Symbol → vote count, in insertion order. Built per scan, never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendScores {
    entries: Vec<(String, u32)>,
}

impl TrendScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a symbol's score. Re-inserting keeps the original position.
    pub fn insert(&mut self, symbol: impl Into<String>, score: u32) {
        let symbol = symbol.into();
        match self.entries.iter_mut().find(|(s, _)| *s == symbol) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((symbol, score)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, score)| *score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, score)| (s.as_str(), *score))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for TrendScores {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut scores = TrendScores::new();
        for (symbol, score) in iter {
            scores.insert(symbol, score);
        }
        scores
    }
}

/// A symbol's place in the ranking (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSymbol {
    pub rank: usize,
    pub symbol: String,
    pub score: u32,
}

/// Stable sort by score, descending.
pub fn rank(scores: &TrendScores) -> Vec<RankedSymbol> {
    let mut entries: Vec<(&str, u32)> = scores.iter().collect();
    // `sort_by` is stable: ties keep insertion order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (symbol, score))| RankedSymbol {
            rank: i + 1,
            symbol: symbol.to_string(),
            score,
        })
        .collect()
}

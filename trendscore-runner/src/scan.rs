//! Scan orchestration: fetch, score, rank, report.
//!
//! Each symbol's history is fetched once and shared by every indicator. Data
//! failures are recorded per symbol and the scan continues; what happens to a
//! symbol with too little history is decided by [`InsufficientDataPolicy`].
//! Parallel scans collect results in input order, so the ranking matches a
//! sequential run exactly.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trendscore_core::data::{BarProvider, DataError};
use trendscore_core::indicators::{IndicatorError, SettingsError};

use crate::config::ScanConfig;
use crate::ranking::{rank, RankedSymbol, TrendScores};
use crate::report::{build_report, ReportOutcome};
use crate::scorer::{ScoreCard, Scorer};

/// What to do with a symbol whose history is shorter than an indicator needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientDataPolicy {
    /// Leave the symbol out of the ranking and record it as skipped.
    #[default]
    Skip,
    /// Score it anyway; short indicators count as non-votes.
    Abstain,
    /// Stop the whole scan.
    Abort,
}

impl InsufficientDataPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Abstain => "abstain",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for InsufficientDataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsufficientDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "abstain" => Ok(Self::Abstain),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "unknown insufficient-data policy `{other}` (expected skip, abstain or abort)"
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan aborted at {symbol}: {source}")]
    InsufficientData {
        symbol: String,
        #[source]
        source: IndicatorError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("no symbols to scan")]
    EmptyUniverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The provider had no usable bars.
    Data,
    /// Too few bars for at least one indicator.
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
    pub message: String,
}

/// Everything a scan produced, in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Score cards in scan order.
    pub cards: Vec<ScoreCard>,
    pub scores: TrendScores,
    pub ranking: Vec<RankedSymbol>,
    pub skipped: Vec<SkippedSymbol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportOutcome>,
}

enum SymbolResult {
    Scored(ScoreCard),
    Skipped(SkippedSymbol),
    Abort(ScanError),
}

/// Scores symbols against one provider.
pub struct Scanner<'a> {
    config: &'a ScanConfig,
    scorer: Scorer,
    provider: &'a dyn BarProvider,
}

impl fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("provider", &self.provider.name())
            .field("scorer", &self.scorer)
            .field("policy", &self.config.on_insufficient_data)
            .finish()
    }
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a ScanConfig, provider: &'a dyn BarProvider) -> Result<Self, ScanError> {
        Ok(Self {
            config,
            scorer: Scorer::new(&config.scaled_indicators()?)?,
            provider,
        })
    }

    /// Replace the indicator library (tests, custom scorers).
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Score, rank and (if configured) report on `symbols`, in that order.
    pub fn run(&self, symbols: &[String]) -> Result<ScanOutcome, ScanError> {
        if symbols.is_empty() {
            return Err(ScanError::EmptyUniverse);
        }

        tracing::info!(
            provider = self.provider.name(),
            symbols = symbols.len(),
            parallel = self.config.parallel,
            policy = %self.config.on_insufficient_data,
            "starting scan"
        );

        let results: Vec<SymbolResult> = if self.config.parallel {
            symbols.par_iter().map(|s| self.score_symbol(s)).collect()
        } else {
            let mut results = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let result = self.score_symbol(symbol);
                let abort = matches!(result, SymbolResult::Abort(_));
                results.push(result);
                if abort {
                    break;
                }
            }
            results
        };

        let mut outcome = ScanOutcome::default();
        for result in results {
            match result {
                SymbolResult::Scored(card) => {
                    outcome.scores.insert(card.symbol.clone(), card.score);
                    outcome.cards.push(card);
                }
                SymbolResult::Skipped(skipped) => outcome.skipped.push(skipped),
                SymbolResult::Abort(e) => return Err(e),
            }
        }

        outcome.ranking = rank(&outcome.scores);
        if self.config.report {
            outcome.report = Some(build_report(&outcome.ranking, self.provider));
        }

        tracing::info!(
            scored = outcome.cards.len(),
            skipped = outcome.skipped.len(),
            "scan finished"
        );
        Ok(outcome)
    }

    /// Fetch one symbol and score it leniently, whatever the configured
    /// policy, so every indicator's verdict or abstention is visible.
    pub fn explain(&self, symbol: &str) -> Result<ScoreCard, DataError> {
        let history = &self.config.history;
        let series = self
            .provider
            .fetch_history(symbol, history.period, history.interval)?;
        Ok(self.scorer.score_lenient(&series))
    }

    fn score_symbol(&self, symbol: &str) -> SymbolResult {
        let history = &self.config.history;
        let series = match self
            .provider
            .fetch_history(symbol, history.period, history.interval)
        {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "skipping symbol: no data");
                return SymbolResult::Skipped(SkippedSymbol {
                    symbol: symbol.to_string(),
                    reason: SkipReason::Data,
                    message: e.to_string(),
                });
            }
        };

        let card = match self.config.on_insufficient_data {
            InsufficientDataPolicy::Abstain => self.scorer.score_lenient(&series),
            policy => match self.scorer.score(&series) {
                Ok(card) => card,
                Err(e) if policy == InsufficientDataPolicy::Abort => {
                    tracing::error!(symbol, error = %e, "aborting scan");
                    return SymbolResult::Abort(ScanError::InsufficientData {
                        symbol: symbol.to_string(),
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!(symbol, error = %e, "skipping symbol: insufficient data");
                    return SymbolResult::Skipped(SkippedSymbol {
                        symbol: symbol.to_string(),
                        reason: SkipReason::InsufficientData,
                        message: e.to_string(),
                    });
                }
            },
        };

        tracing::info!(symbol, score = card.score, bars = series.len(), "scored");
        SymbolResult::Scored(card)
    }
}

/// Run a full scan over `symbols` with `config` against `provider`.
pub fn run_scan(
    config: &ScanConfig,
    symbols: &[String],
    provider: &dyn BarProvider,
) -> Result<ScanOutcome, ScanError> {
    Scanner::new(config, provider)?.run(symbols)
}

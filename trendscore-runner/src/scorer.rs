//! Composite scorer: ten votes over one series, summed into a 0–10 score.
//!
//! Every indicator sees the same immutable `BarSeries`; indicators never see
//! each other's verdicts. The score is the exact count of bullish verdicts.

use serde::{Deserialize, Serialize};
use trendscore_core::domain::BarSeries;
use trendscore_core::indicators::{
    IndicatorError, IndicatorSettings, SettingsError, TrendIndicator,
};

/// One indicator's vote for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorVerdict {
    pub symbol: String,
    pub indicator: String,
    pub bullish: bool,
}

/// Per-symbol scoring result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub symbol: String,
    /// Count of bullish verdicts.
    pub score: u32,
    pub verdicts: Vec<IndicatorVerdict>,
    /// Indicators that had too few bars to vote (lenient scoring only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abstained: Vec<String>,
}

impl ScoreCard {
    fn from_verdicts(symbol: &str, verdicts: Vec<IndicatorVerdict>, abstained: Vec<String>) -> Self {
        let score = verdicts.iter().filter(|v| v.bullish).count() as u32;
        Self {
            symbol: symbol.to_string(),
            score,
            verdicts,
            abstained,
        }
    }

    pub fn bullish_indicators(&self) -> impl Iterator<Item = &str> {
        self.verdicts
            .iter()
            .filter(|v| v.bullish)
            .map(|v| v.indicator.as_str())
    }
}

/// Runs an indicator library over a series.
pub struct Scorer {
    indicators: Vec<Box<dyn TrendIndicator>>,
}

impl Scorer {
    /// The ten-indicator library configured by `settings`.
    pub fn new(settings: &IndicatorSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            indicators: settings.library(),
        })
    }

    /// Any indicator set, in voting order.
    pub fn with_indicators(indicators: Vec<Box<dyn TrendIndicator>>) -> Self {
        Self { indicators }
    }

    pub fn indicators(&self) -> &[Box<dyn TrendIndicator>] {
        &self.indicators
    }

    /// Highest attainable score.
    pub fn max_score(&self) -> u32 {
        self.indicators.len() as u32
    }

    /// Bars needed for every indicator to vote.
    pub fn min_bars(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.min_bars())
            .max()
            .unwrap_or(0)
    }

    /// Score a series. The first indicator short of data fails the whole symbol.
    pub fn score(&self, series: &BarSeries) -> Result<ScoreCard, IndicatorError> {
        let symbol = series.symbol();
        let verdicts = self
            .indicators
            .iter()
            .map(|indicator| {
                let bullish = indicator.evaluate(series.bars())?;
                tracing::debug!(symbol, indicator = indicator.name(), bullish, "verdict");
                Ok(IndicatorVerdict {
                    symbol: symbol.to_string(),
                    indicator: indicator.name().to_string(),
                    bullish,
                })
            })
            .collect::<Result<Vec<_>, IndicatorError>>()?;
        Ok(ScoreCard::from_verdicts(symbol, verdicts, Vec::new()))
    }

    /// Score a series, counting indicators short of data as non-votes.
    pub fn score_lenient(&self, series: &BarSeries) -> ScoreCard {
        let symbol = series.symbol();
        let mut verdicts = Vec::with_capacity(self.indicators.len());
        let mut abstained = Vec::new();

        for indicator in &self.indicators {
            match indicator.evaluate(series.bars()) {
                Ok(bullish) => {
                    tracing::debug!(symbol, indicator = indicator.name(), bullish, "verdict");
                    verdicts.push(IndicatorVerdict {
                        symbol: symbol.to_string(),
                        indicator: indicator.name().to_string(),
                        bullish,
                    });
                }
                Err(IndicatorError::InsufficientData {
                    required,
                    available,
                    ..
                }) => {
                    tracing::debug!(
                        symbol,
                        indicator = indicator.name(),
                        required,
                        available,
                        "abstained"
                    );
                    abstained.push(indicator.name().to_string());
                }
            }
        }

        ScoreCard::from_verdicts(symbol, verdicts, abstained)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            indicators: IndicatorSettings::default().library(),
        }
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.indicators.iter().map(|i| i.name()))
            .finish()
    }
}

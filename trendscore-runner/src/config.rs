//! Scan configuration loaded from TOML.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! on_insufficient_data = "skip"   # skip | abstain | abort
//! parallel = false
//! report = true
//!
//! [universe]
//! tickers = ["AAPL", "MSFT"]      # or: file = "universe.toml"; neither = NASDAQ-100
//!
//! [history]
//! period = "1y"
//! interval = "1d"
//!
//! [indicators]
//! rsi_threshold = 55.0
//! week_bars = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trendscore_core::data::{Interval, Period, Universe, UniverseError};
use trendscore_core::indicators::{IndicatorSettings, SettingsError};

use crate::scan::InsufficientDataPolicy;

/// Longest history Yahoo serves at intraday resolution, in sessions.
const MAX_INTRADAY_SESSIONS: u32 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where the scan's symbols come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniverseConfig {
    pub tickers: Option<Vec<String>>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub period: Period,
    pub interval: Interval,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            period: Period::Year1,
            interval: Interval::Day1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub on_insufficient_data: InsufficientDataPolicy,
    /// Score symbols on the rayon pool. Ranking is identical either way.
    pub parallel: bool,
    /// Fetch same-day open/close for the ranked symbols.
    pub report: bool,
    pub universe: UniverseConfig,
    pub history: HistoryConfig,
    pub indicators: IndicatorSettings,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            on_insufficient_data: InsufficientDataPolicy::default(),
            parallel: false,
            report: true,
            universe: UniverseConfig::default(),
            history: HistoryConfig::default(),
            indicators: IndicatorSettings::default(),
        }
    }
}

impl ScanConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ScanConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scaled_indicators()?;

        if self.history.interval.is_intraday() {
            let sessions = self.history.period.trading_days();
            if sessions.map_or(true, |days| days > MAX_INTRADAY_SESSIONS) {
                return Err(ConfigError::Invalid(format!(
                    "{} bars are only available for periods up to 60d, got {}",
                    self.history.interval, self.history.period
                )));
            }
        }

        match (&self.universe.tickers, &self.universe.file) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid(
                "universe: set either `tickers` or `file`, not both".into(),
            )),
            (Some(tickers), None) if tickers.iter().all(|t| t.trim().is_empty()) => Err(
                ConfigError::Invalid("universe: `tickers` is empty".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Indicator settings with the week window expressed in bars of the
    /// configured history interval.
    pub fn scaled_indicators(&self) -> Result<IndicatorSettings, SettingsError> {
        self.indicators.validate()?;
        self.indicators.for_interval(self.history.interval)
    }

    /// The configured universe; NASDAQ-100 when none is given.
    pub fn resolve_universe(&self) -> Result<Universe, ConfigError> {
        match (&self.universe.tickers, &self.universe.file) {
            (Some(tickers), _) => Ok(Universe::new("custom", tickers)),
            (None, Some(file)) => Ok(Universe::from_file(file)?),
            (None, None) => Ok(Universe::nasdaq_100()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ScanConfig::from_toml("").unwrap();
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.history.period, Period::Year1);
        assert_eq!(config.on_insufficient_data, InsufficientDataPolicy::Skip);
        assert!(config.report);
        assert_eq!(config.resolve_universe().unwrap().name, "nasdaq-100");
    }

    #[test]
    fn parses_full_config() {
        let config = ScanConfig::from_toml(
            r#"
            on_insufficient_data = "abstain"
            parallel = true
            report = false

            [universe]
            tickers = ["aapl", "MSFT"]

            [history]
            period = "6mo"
            interval = "1d"

            [indicators]
            rsi_threshold = 60.0
            week_bars = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.on_insufficient_data, InsufficientDataPolicy::Abstain);
        assert!(config.parallel);
        assert!(!config.report);
        assert_eq!(config.history.period, Period::Month6);
        assert_eq!(config.indicators.rsi_threshold, 60.0);
        assert_eq!(config.indicators.week_bars, 10);
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.resolve_universe().unwrap().tickers(), ["AAPL", "MSFT"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ScanConfig::from_toml("paralel = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_indicator_settings_are_rejected() {
        let err = ScanConfig::from_toml("[indicators]\nrsi_threshold = 150.0").unwrap_err();
        assert!(matches!(err, ConfigError::Settings(_)));
    }

    #[test]
    fn intraday_history_is_capped() {
        let err = ScanConfig::from_toml("[history]\nperiod = \"1y\"\ninterval = \"5m\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(ScanConfig::from_toml("[history]\nperiod = \"5d\"\ninterval = \"5m\"").is_ok());
    }

    #[test]
    fn week_window_follows_the_interval() {
        let daily = ScanConfig::default();
        assert_eq!(daily.scaled_indicators().unwrap().week_bars, 5);

        let intraday =
            ScanConfig::from_toml("[history]\nperiod = \"60d\"\ninterval = \"5m\"").unwrap();
        assert_eq!(intraday.indicators.week_bars, 5);
        assert_eq!(intraday.scaled_indicators().unwrap().week_bars, 5 * 78);
    }

    #[test]
    fn weekly_bars_are_rejected() {
        let err = ScanConfig::from_toml("[history]\ninterval = \"1wk\"").unwrap_err();
        assert!(
            matches!(&err, ConfigError::Settings(e) if e.field == "week_bars"),
            "{err}"
        );
    }

    #[test]
    fn universe_sources_are_exclusive() {
        let err = ScanConfig::from_toml("[universe]\ntickers = [\"A\"]\nfile = \"u.toml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = ScanConfig::from_toml("[universe]\ntickers = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScanConfig::from_file(Path::new("/no/such/scan.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

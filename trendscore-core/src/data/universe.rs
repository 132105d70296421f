//! Universe: the ordered ticker list a scan walks.
//!
//! Order matters: it is the insertion order of the score table, and ties in
//! the ranking keep it. Duplicates are dropped on construction (first wins).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse universe TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("universe `{0}` has no tickers")]
    Empty(String),
}

/// NASDAQ-100 constituents, in listing order.
const NASDAQ_100: &[&str] = &[
    "ABNB", "ALGN", "AMD", "CEG", "AMZN", "AMGN", "AEP", "ADI", "ANSS", "AAPL", "AMAT", "GEHC",
    "ASML", "TEAM", "ADSK", "ATVI", "ADP", "AZN", "BKR", "AVGO", "BIIB", "BKNG", "CDNS", "ADBE",
    "CHTR", "CPRT", "CSGP", "CRWD", "CTAS", "CSCO", "CMCSA", "COST", "CSX", "CTSH", "DDOG",
    "DXCM", "FANG", "DLTR", "EA", "EBAY", "ENPH", "ON", "EXC", "FAST", "GFS", "META", "FI",
    "FTNT", "GILD", "GOOG", "GOOGL", "HON", "ILMN", "INTC", "INTU", "ISRG", "MRVL", "IDXX", "JD",
    "KDP", "KLAC", "KHC", "LRCX", "LCID", "LULU", "MELI", "MAR", "MCHP", "MDLZ", "MRNA", "MNST",
    "MSFT", "MU", "NFLX", "NVDA", "NXPI", "ODFL", "ORLY", "PCAR", "PANW", "PAYX", "PDD", "PLTR",
    "PYPL", "PEP", "QCOM", "REGN", "ROST", "SIRI", "SGEN", "SBUX", "SNPS", "TSLA", "TXN", "TMUS",
    "VRSK", "VRTX", "WBA", "WBD", "WDAY", "XEL", "ZM", "ZS",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    pub name: String,
    tickers: Vec<String>,
}

#[derive(Deserialize)]
struct UniverseFile {
    #[serde(default = "custom_name")]
    name: String,
    tickers: Vec<String>,
}

fn custom_name() -> String {
    "custom".to_string()
}

impl Universe {
    /// Build a universe; tickers are trimmed, upper-cased and de-duplicated.
    pub fn new<I, S>(name: impl Into<String>, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let tickers = tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_ascii_uppercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        Self {
            name: name.into(),
            tickers,
        }
    }

    pub fn nasdaq_100() -> Self {
        Self::new("nasdaq-100", NASDAQ_100.iter().copied())
    }

    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse `name = "..."` / `tickers = [...]`.
    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        let file: UniverseFile = toml::from_str(content)?;
        let universe = Self::new(file.name, file.tickers);
        if universe.is_empty() {
            return Err(UniverseError::Empty(universe.name));
        }
        Ok(universe)
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.tickers.iter().any(|t| t.eq_ignore_ascii_case(symbol))
    }
}

//! TrendScore CLI: scan a ticker universe and explain per-symbol votes.
//!
//! Commands:
//! - `scan`: score every symbol, rank them, and report today's move
//! - `explain`: show each indicator's verdict for one symbol
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`); stdout carries only results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;
use trendscore_core::data::{
    BarProvider, CircuitBreaker, Interval, Period, SyntheticProvider, Universe, YahooProvider,
};
use trendscore_runner::{
    export_json, write_csv, InsufficientDataPolicy, ScanConfig, ScanOutcome, Scanner, ScoreCard,
    Scorer,
};

#[derive(Parser)]
#[command(
    name = "trendscore",
    version,
    about = "TrendScore CLI: ten-indicator trend scores for a ticker universe"
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score, rank and report on a universe.
    Scan {
        /// Symbols to scan. Defaults to the configured universe (NASDAQ-100).
        symbols: Vec<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// What to do with symbols that have too little history.
        #[arg(long, value_name = "skip|abstain|abort")]
        on_insufficient: Option<InsufficientDataPolicy>,

        /// Score symbols in parallel.
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Skip the same-day open/close report.
        #[arg(long, default_value_t = false)]
        no_report: bool,

        /// Print the full outcome as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the ranking to this CSV file.
        #[arg(long, value_name = "FILE")]
        export_csv: Option<PathBuf>,
    },
    /// Show every indicator verdict for one symbol.
    Explain {
        symbol: String,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to a TOML scan config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use seeded synthetic bars instead of Yahoo Finance.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Seed for synthetic bars.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// History period (1d, 5d, 7d, 1mo, 60d, 3mo, 6mo, 1y, 2y, 5y, max).
    #[arg(long)]
    period: Option<Period>,

    /// Bar interval (1m, 2m, 5m, 15m, 30m, 60m or 1d).
    #[arg(long)]
    interval: Option<Interval>,
}

impl SourceArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn load_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ScanConfig::default(),
        };
        if let Some(period) = self.period {
            config.history.period = period;
        }
        if let Some(interval) = self.interval {
            config.history.interval = interval;
        }
        Ok(config)
    }

    fn provider(&self) -> Result<Box<dyn BarProvider>> {
        if self.synthetic {
            return Ok(Box::new(SyntheticProvider::new(self.seed)));
        }
        let breaker = Arc::new(CircuitBreaker::default_provider());
        let provider =
            YahooProvider::new(breaker).context("failed to set up Yahoo Finance provider")?;
        Ok(Box::new(provider))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan {
            symbols,
            source,
            on_insufficient,
            parallel,
            no_report,
            json,
            export_csv,
        } => {
            let mut config = source.load_config()?;
            if let Some(policy) = on_insufficient {
                config.on_insufficient_data = policy;
            }
            config.parallel |= parallel;
            if no_report {
                config.report = false;
            }
            config.validate().context("invalid scan settings")?;
            tracing::debug!(?config, "resolved scan config");

            let symbols = if symbols.is_empty() {
                config.resolve_universe()?.tickers().to_vec()
            } else {
                Universe::new("cli", &symbols).tickers().to_vec()
            };

            let provider = source.provider()?;
            let outcome = Scanner::new(&config, provider.as_ref())?.run(&symbols)?;

            if json {
                println!("{}", export_json(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
            if let Some(path) = export_csv {
                write_csv(&outcome, &path)?;
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Explain { symbol, source } => {
            let config = source.load_config()?;
            config.validate().context("invalid scan settings")?;
            let provider = source.provider()?;
            let scanner = Scanner::new(&config, provider.as_ref())?;
            let symbol = symbol.trim().to_ascii_uppercase();
            let card = scanner
                .explain(&symbol)
                .with_context(|| format!("failed to fetch {symbol}"))?;
            print_explain(&card, scanner.scorer());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_outcome(outcome: &ScanOutcome) {
    match &outcome.report {
        Some(report) => {
            println!(
                "{:>4}  {:<6} {:>5}  {:>10}  {:>10}  {:>8}",
                "rank", "symbol", "score", "open", "close", "change"
            );
            for entry in &outcome.ranking {
                match report.rows.iter().find(|r| r.symbol == entry.symbol) {
                    Some(row) => {
                        let line = format!(
                            "{:>4}  {:<6} {:>5}  {:>10.2}  {:>10.2}  {:>7.2}%",
                            entry.rank,
                            row.symbol,
                            row.score,
                            row.open_price,
                            row.close_price,
                            row.percent_change
                        );
                        if row.is_gain() {
                            println!("{}", line.green());
                        } else {
                            println!("{}", line.blue());
                        }
                    }
                    None => println!(
                        "{:>4}  {:<6} {:>5}  {:>10}  {:>10}  {:>8}",
                        entry.rank, entry.symbol, entry.score, "-", "-", "-"
                    ),
                }
            }
            for failure in &report.failures {
                eprintln!("No same-day prices for {}: {}", failure.symbol, failure.error);
            }
        }
        None => {
            println!("{:>4}  {:<6} {:>5}", "rank", "symbol", "score");
            for entry in &outcome.ranking {
                println!("{:>4}  {:<6} {:>5}", entry.rank, entry.symbol, entry.score);
            }
        }
    }

    for skipped in &outcome.skipped {
        eprintln!("Skipped {}: {}", skipped.symbol, skipped.message);
    }
}

fn print_explain(card: &ScoreCard, scorer: &Scorer) {
    println!(
        "{}  score {}/{}",
        card.symbol.as_str().bold(),
        card.score,
        scorer.max_score()
    );
    for verdict in &card.verdicts {
        if verdict.bullish {
            println!("  {:<18} {}", verdict.indicator, "bullish".green());
        } else {
            println!("  {:<18} {}", verdict.indicator, "not bullish".blue());
        }
    }
    for name in &card.abstained {
        println!("  {:<18} {}", name, "too few bars".dark_grey());
    }
    if !card.abstained.is_empty() {
        println!("  (a full vote needs {} bars)", scorer.min_bars());
    }
}

//! GoldSight CLI — analyze and backtest commands.
//!
//! Commands:
//! - `analyze` — run one evaluation cycle (indicators, classifier bias,
//!   confirmation score, trade setup) and print it as JSON
//! - `backtest` — replay the pipeline over a CSV history
//! - `intervals` — list the accepted timeframe labels

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use goldsight_core::backtest::{self, BacktestConfig};
use goldsight_core::classifier::{train, ForestConfig};
use goldsight_core::config::{AppConfig, TIMEFRAMES};
use goldsight_core::data::{read_csv, BarProvider, TwelveDataProvider};
use goldsight_core::decision::decide;
use goldsight_core::domain::{Bias, PriceSeries, TradeSetup};
use goldsight_core::indicators::IndicatorSet;

#[derive(Parser)]
#[command(name = "goldsight", about = "GoldSight CLI — XAU/USD signal pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one evaluation cycle and print the trade setup as JSON.
    Analyze {
        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read bars from a CSV file instead of fetching from Twelve Data.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Replay the pipeline over a CSV history and print the report as JSON.
    Backtest {
        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV bar history (timestamp,open,high,low,close,volume).
        #[arg(long, required = true)]
        csv: PathBuf,
    },
    /// List the accepted timeframe labels and their provider intervals.
    Intervals,
}

/// One evaluation cycle, serialized for the caller.
#[derive(Serialize)]
struct Analysis {
    symbol: String,
    timeframe: String,
    price: f64,
    atr: f64,
    probability: f64,
    bias: Bias,
    setup: TradeSetup,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { config, csv } => run_analyze(config.as_deref(), csv.as_deref()),
        Commands::Backtest { config, csv } => run_backtest(config.as_deref(), &csv),
        Commands::Intervals => run_intervals(),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(AppConfig::default()),
    }
}

fn load_series(config: &AppConfig, csv: Option<&Path>) -> Result<PriceSeries> {
    match csv {
        Some(path) => read_csv(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let interval = config.interval()?;
            let provider = TwelveDataProvider::new(config.symbol.clone())?;
            provider
                .fetch(interval, config.output_size)
                .with_context(|| format!("fetching {} from {}", config.symbol, provider.name()))
        }
    }
}

fn run_analyze(config_path: Option<&Path>, csv: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let series = load_series(&config, csv)?;
    let bars = series.bars();

    let indicators = IndicatorSet::standard(bars);
    let last = bars.len() - 1;
    let price = series.last().close;
    let atr = indicators
        .get("atr_14", last)
        .context("not enough history for ATR")?;

    let model = train(bars, &indicators, ForestConfig::default())
        .context("training the direction model")?;
    let row = model
        .latest_feature_row(bars, &indicators)
        .context("latest bar has undefined features")?;
    let probability = model.predict_probability(&row);
    let bias = Bias::from_probability(probability);

    let setup = decide(price, atr, bias, Some(bars), config.min_confidence);

    let analysis = Analysis {
        symbol: config.symbol.clone(),
        timeframe: config.timeframe.clone(),
        price,
        atr,
        probability,
        bias,
        setup,
    };
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn run_backtest(config_path: Option<&Path>, csv: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let series = read_csv(csv).with_context(|| format!("reading {}", csv.display()))?;

    let bt_config = BacktestConfig {
        initial_balance: config.initial_balance,
        risk_per_trade: config.risk_per_trade,
        min_confidence: config.min_confidence,
        ..BacktestConfig::default()
    };
    let report = backtest::run(series.bars(), &bt_config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_intervals() -> Result<()> {
    for (label, interval) in TIMEFRAMES {
        println!("{label:>4}  ->  {interval}");
    }
    Ok(())
}

//! PriceLab CLI: download raw price data and analyze it.
//!
//! Commands:
//! - `download`: fetch daily bars from Yahoo Finance into `data/raw/{symbol}_raw.csv`
//! - `analyze`: load the raw files and print Sharpe, VaR and rolling volatility
//! - `status`: report which raw files exist and the dates they cover

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pricelab_core::data::{
    fetch_and_save, load_price_table, RawStore, TracingProgress, YahooProvider,
};
use pricelab_core::stats::RiskReport;
use pricelab_core::RunConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricelab",
    about = "PriceLab CLI: daily price downloads and risk/return statistics"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct CommonArgs {
    /// Symbols (e.g., TSLA SPY BND). Defaults to the config's symbols.
    symbols: Vec<String>,

    /// TOML run config. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raw data directory. Defaults to data/raw.
    #[arg(long)]
    raw_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily bars and write one raw CSV per symbol.
    Download {
        #[command(flatten)]
        common: CommonArgs,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive.
        #[arg(long)]
        end: Option<String>,
    },
    /// Load raw files and print risk/return statistics.
    Analyze {
        #[command(flatten)]
        common: CommonArgs,

        /// Annual risk-free rate for the Sharpe ratio.
        #[arg(long)]
        risk_free_rate: Option<f64>,

        /// VaR confidence level, e.g. 0.95.
        #[arg(long)]
        confidence: Option<f64>,

        /// Rolling volatility window, in rows.
        #[arg(long)]
        window: Option<usize>,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report which raw files exist, with row counts and date ranges.
    Status {
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Download { common, start, end } => {
            let mut config = load_config(&common)?;
            if let Some(start) = start.as_deref() {
                config.start_date = parse_date(start)?;
            }
            if let Some(end) = end.as_deref() {
                config.end_date = parse_date(end)?;
            }
            config.validate()?;
            run_download(&config)
        }
        Commands::Analyze {
            common,
            risk_free_rate,
            confidence,
            window,
            json,
        } => {
            let mut config = load_config(&common)?;
            if let Some(rf) = risk_free_rate {
                config.risk.risk_free_rate = rf;
            }
            if let Some(c) = confidence {
                config.risk.confidence_level = c;
            }
            if let Some(w) = window {
                config.risk.window = w;
            }
            config.validate()?;
            run_analyze(&config, json)
        }
        Commands::Status { common } => {
            let config = load_config(&common)?;
            run_status(&config)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}

/// Config file (or defaults) with the shared command-line overrides applied.
fn load_config(common: &CommonArgs) -> Result<RunConfig> {
    let mut config = match &common.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };

    if !common.symbols.is_empty() {
        config.symbols = common.symbols.clone();
    }
    if let Some(raw_dir) = &common.raw_dir {
        config.raw_dir = raw_dir.clone();
    }
    Ok(config)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn run_download(config: &RunConfig) -> Result<()> {
    let provider = YahooProvider::new()?;
    let store = RawStore::new(&config.raw_dir);

    let summary = fetch_and_save(
        &provider,
        &store,
        &config.symbol_refs(),
        config.start_date,
        config.end_date,
        &TracingProgress,
    );

    println!();
    println!(
        "Download complete: {}/{} saved, {} empty, {} failed",
        summary.saved.len(),
        summary.total(),
        summary.empty.len(),
        summary.failed.len()
    );
    for (sym, err) in &summary.failed {
        println!("  {sym}: {err}");
    }

    Ok(())
}

fn run_analyze(config: &RunConfig, json: bool) -> Result<()> {
    let store = RawStore::new(&config.raw_dir);
    let symbols = config.symbol_refs();

    let prices = load_price_table(&store, &symbols);
    if prices.is_empty() {
        bail!("no price data loaded for {symbols:?}");
    }

    let report = RiskReport::compute(&prices, &config.risk);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &RiskReport) {
    let range = match (report.start_date, report.end_date) {
        (Some(s), Some(e)) => format!("{s} to {e}"),
        _ => "(no dates)".into(),
    };

    println!("Prices: {range}");
    println!("Daily returns: {} observations", report.observations);
    println!(
        "Risk-free rate: {}  VaR confidence: {}  Volatility window: {}",
        report.params.risk_free_rate, report.params.confidence_level, report.params.window
    );
    println!();
    println!(
        "{:<8} {:>12} {:>10} {:>10} {:>12}",
        "Symbol", "Mean daily", "Sharpe", "VaR", "Rolling vol"
    );
    println!("{}", "-".repeat(56));
    for s in &report.symbols {
        println!(
            "{:<8} {:>12} {:>10} {:>10} {:>12}",
            s.symbol,
            format_stat(s.mean_daily_return, 6),
            format_stat(s.sharpe_ratio, 3),
            format_stat(s.value_at_risk, 4),
            s.latest_volatility
                .map(|v| format_stat(v, 4))
                .unwrap_or_else(|| "-".into()),
        );
    }
}

/// Fixed-precision number, or its non-finite name (inf, NaN).
fn format_stat(value: f64, precision: usize) -> String {
    if value.is_finite() {
        format!("{value:.precision$}")
    } else {
        value.to_string()
    }
}

fn run_status(config: &RunConfig) -> Result<()> {
    let store = RawStore::new(&config.raw_dir);
    let symbols = config.symbol_refs();

    println!("Raw data: {}", store.raw_dir().display());
    println!();
    println!("{:<8} {:<25} {:>8}", "Symbol", "Date Range", "Rows");
    println!("{}", "-".repeat(43));

    for (sym, status) in symbols.iter().zip(store.status(&symbols)) {
        match status {
            Ok(s) => {
                let range = match (s.first_date, s.last_date) {
                    (Some(first), Some(last)) => format!("{first} to {last}"),
                    _ => "(no rows)".into(),
                };
                println!("{:<8} {:<25} {:>8}", sym, range, s.rows);
            }
            Err(e) => println!("{:<8} {}", sym, e),
        }
    }

    Ok(())
}

use alerter::{AlertRenderer, Analysis, format_dollars, scan_events};
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat, init_tracing, load_config};
use core_types::PressureEvent;
use events::{EventSource, JsonFileFeed, MockNewsFeed};
use pressure::{IndexTable, PressureCalculator};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// The main entry point for the Index Inclusion Sniper.
fn main() -> Result<()> {
    // Optional .env with SNIPER_* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.display.format = format;
    }
    // The subscriber depends on the loaded settings, so nothing before this point is logged.
    let _log_guard = init_tracing(&config.logging).context("Failed to initialise logging")?;
    tracing::debug!(
        path = ?cli.config,
        format = ?config.display.format,
        "Configuration loaded."
    );

    let table = IndexTable::from_config(&config).context("Invalid index reference table")?;
    tracing::info!(
        indices = ?table.ids().collect::<Vec<_>>(),
        default_index = %table.default_profile().id,
        "Index reference table loaded."
    );
    let calculator = PressureCalculator::new(table);
    let today = Local::now().date_naive();

    match cli.command {
        None => handle_scan(cli.events, today, &config, &calculator),
        Some(Commands::Analyze(args)) => handle_analyze(args, &config, &calculator),
        Some(Commands::Indices) => handle_indices(&calculator),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Scores the mechanical buying pressure of stocks joining an index.
///
/// With no subcommand, scans the index news feed and prints one alert per event.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the configured one.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Read index events from this JSON file instead of the demonstration feed.
    #[arg(long)]
    events: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single ticker from the command line.
    Analyze(AnalyzeArgs),
    /// List the configured index reference table.
    Indices,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The stock symbol (e.g., "PATH").
    #[arg(long)]
    ticker: String,

    /// Market capitalization in dollars.
    #[arg(long)]
    market_cap: Decimal,

    /// Current share price in dollars.
    #[arg(long)]
    price: Decimal,

    /// Average daily volume over the last 30 sessions, in shares.
    #[arg(long)]
    avg_volume: Decimal,

    /// The destination index (e.g., "SP400").
    #[arg(long)]
    index: String,

    /// Shares traded so far this morning.
    #[arg(long, requires = "typical_morning_volume")]
    morning_volume: Option<Decimal>,

    /// Shares typically traded by this time of day.
    #[arg(long, requires = "morning_volume")]
    typical_morning_volume: Option<Decimal>,

    /// Fail instead of falling back to the default index when `--index` is unknown.
    #[arg(long)]
    strict: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Scans the event feed and prints an alert per event, as of `today`.
fn handle_scan(
    events: Option<PathBuf>,
    today: NaiveDate,
    config: &Config,
    calculator: &PressureCalculator,
) -> Result<()> {
    let source: Box<dyn EventSource> = match events {
        Some(path) => Box::new(JsonFileFeed::new(path)),
        None => Box::new(MockNewsFeed::new(today)),
    };

    let outcome = scan_events(source.as_ref(), calculator, today)?;
    let renderer = AlertRenderer::new(config.display.clone());
    print!("{}", renderer.render(&outcome.alerts)?);
    if renderer.format() == OutputFormat::Json {
        println!();
    }

    if !outcome.failures.is_empty() {
        for failure in &outcome.failures {
            eprintln!("Skipped: {failure}");
        }
        bail!("{} event(s) could not be scored", outcome.failures.len());
    }

    Ok(())
}

/// Scores one ticker given on the command line.
fn handle_analyze(
    args: AnalyzeArgs,
    config: &Config,
    calculator: &PressureCalculator,
) -> Result<()> {
    if args.strict && !calculator.table().contains(&args.index) {
        let known: Vec<_> = calculator.table().ids().collect();
        bail!(
            "Unknown index '{}'. Configured indices: {}",
            args.index,
            known.join(", ")
        );
    }

    let event = PressureEvent::new(
        args.ticker,
        args.market_cap,
        args.price,
        args.avg_volume,
        args.index,
    );
    let morning_volumes = args.morning_volume.zip(args.typical_morning_volume);

    let analysis = Analysis::compute(&event, morning_volumes, calculator)?;
    let renderer = AlertRenderer::new(config.display.clone());
    println!("{}", renderer.render_analysis(&analysis)?.trim_end());

    Ok(())
}

/// Prints the index reference table in use.
fn handle_indices(calculator: &PressureCalculator) -> Result<()> {
    let table = calculator.table();
    let default_id = table.default_profile().id.as_str();

    for profile in table.profiles() {
        let marker = if profile.id == default_id { " (default)" } else { "" };
        println!(
            "{}{}: AUM {}, total market cap {}",
            profile.id,
            marker,
            format_dollars(profile.aum),
            format_dollars(profile.total_market_cap)
        );
    }

    Ok(())
}

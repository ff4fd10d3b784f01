use analytics::{AnalysisOptions, SalesAnalyticsEngine};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{load_config, Logging};
use core_types::SalesData;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod render;

/// The main entry point for the seller-insights application.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Builds per-seller revenue, profit and bonus reports from raw sales data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sales dataset and print the seller ranking.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON file with `sellers`, `products` and `purchase_records` arrays.
    #[arg(long)]
    data: PathBuf,

    /// Configuration file. Built-in defaults apply when it does not exist.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// How to print the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override the number of top products listed per seller.
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Handles the orchestration of a single report run.
fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    // Held until the end of the run so buffered file logs are flushed.
    let _log_guard = init_tracing(&config.logging)?;
    if !config_file_found(&args.config) {
        tracing::info!(
            path = %args.config.display(),
            "Configuration file not found, using defaults."
        );
    }

    let data = load_sales_data(&args.data)?;
    tracing::info!(
        path = %args.data.display(),
        sellers = data.sellers.len(),
        products = data.products.len(),
        purchase_records = data.purchase_records.len(),
        "Loaded sales data."
    );

    let mut options = AnalysisOptions::from_config(&config)?;
    if let Some(limit) = args.top {
        options = options.with_top_products_limit(limit);
    }

    let reports = SalesAnalyticsEngine::new()
        .analyze(&data, &options)
        .context("Sales analysis failed")?;

    let rendered = match args.format {
        OutputFormat::Table => render::render_table(&reports),
        OutputFormat::Json => render::render_json(&reports)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written.");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Whether `load_config` had a file to read at `path`, as opposed to defaults and environment only.
fn config_file_found(path: &Path) -> bool {
    path.is_file()
}

/// Reads and parses the sales dataset from a JSON file.
fn load_sales_data(path: &Path) -> Result<SalesData> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open sales data file {}", path.display()))?;
    SalesData::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse sales data file {}", path.display()))
}

/// Installs the global subscriber: stderr always, plus a daily-rolling file when configured.
///
/// `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &Logging) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "seller-insights.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}

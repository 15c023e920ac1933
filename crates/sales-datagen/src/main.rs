//! Sales Data Generator CLI
//!
//! Writes a sample sales CSV and prints offline dashboard reports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sales_analytics::AnalyticsEngine;
use sales_datagen::{GeneratorConfig, SalesGenerator, write_csv_file};
use sales_domain::{ALL_REGIONS, DashboardFilter};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sales-datagen")]
#[command(about = "Generate sample sales data and offline reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample sales CSV
    Generate(GenerateArgs),
    /// Print a dashboard report for a sales CSV
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of line items
    #[arg(short, long, default_value = "500")]
    rows: usize,

    /// Width of the date window in days
    #[arg(long, default_value = "60")]
    days: u32,

    /// Last date of the window (YYYY-MM-DD, default today)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output path
    #[arg(short, long, default_value = "data/sales.csv")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Sales CSV to analyse
    #[arg(long, default_value = "data/sales.csv")]
    data: PathBuf,

    /// Region code, or ALL
    #[arg(long, default_value = ALL_REGIONS)]
    region: String,

    /// Only the last N days of data (0 = all time)
    #[arg(long, default_value = "0")]
    days: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown")]
    format: ReportFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so reports can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sales_datagen=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Generate(args) => generate(args),
        Command::Report(args) => report(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = GeneratorConfig {
        rows: args.rows,
        days: args.days,
        end: args.end.unwrap_or_else(|| Utc::now().date_naive()),
        seed: args.seed,
    };

    info!(
        "Generating {} rows over {} days ending {} (seed {})",
        config.rows, config.days, config.end, config.seed
    );

    let rows = SalesGenerator::new(config).generate();
    write_csv_file(&rows, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!("Wrote {} rows to {}", rows.len(), args.output.display());
    Ok(())
}

fn report(args: ReportArgs) -> Result<()> {
    let engine = AnalyticsEngine::from_csv(&args.data);
    let filter = DashboardFilter::new(args.region, args.days);

    info!("Reporting on {} ({:?})", engine.source_location(), filter);

    let output = match args.format {
        ReportFormat::Markdown => engine.generate_report_markdown(&filter)?,
        ReportFormat::Json => engine.generate_report_json(&filter)?,
    };

    println!("{output}");
    Ok(())
}

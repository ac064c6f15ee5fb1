use anyhow::{bail, Context, Result};
use clap::Parser;
use finassist_analysis::Pipeline;
use finassist_core::{AnalysisConfig, Transaction};
use finassist_import::{import_financial_data, sample_transactions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Imports a bank export, categorizes it and prints statistics and a budget
/// as JSON.
#[derive(Debug, Parser)]
#[command(name = "finassist", version)]
struct Args {
    /// TOML file with analysis settings and extra category keywords.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Analyze the built-in demo transactions instead of a file.
    #[arg(long, conflicts_with = "file")]
    sample: bool,

    /// CSV or JSON export to analyze.
    #[arg(value_name = "FILE", required_unless_present = "sample")]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let transactions = load_transactions(&args);
    if transactions.is_empty() {
        bail!("no transactions to analyze");
    }

    let analysis = Pipeline::new(config).run(&transactions);
    let summary = &analysis.categorization;
    tracing::info!(
        "Categorized {}/{} transactions ({:.1}%)",
        summary.recognized,
        summary.total,
        summary.recognition_rate()
    );

    let json = serde_json::to_string_pretty(&analysis.report()).context("failed to render report")?;
    println!("{json}");
    Ok(())
}

fn load_transactions(args: &Args) -> Vec<Transaction> {
    match &args.file {
        Some(path) if !args.sample => import_financial_data(path),
        _ => {
            tracing::info!("Using sample data");
            sample_transactions()
        }
    }
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

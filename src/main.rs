// src/main.rs
mod utils;
mod extractors;
mod plan;
mod storage;

use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use plan::models::DEFAULT_SUITE;
use plan::ConvertOptions;
use utils::AppError;

/// Command Line Interface for the Markdown test plan to CSV converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markdown test plan to convert
    #[arg(short, long, default_value = "specs/espocrm-opportunities-test-plan.md")]
    input: PathBuf,

    /// CSV file to write (its directory is created if missing)
    #[arg(short, long, default_value = "output/espocrm_test_plan.csv")]
    output: PathBuf,

    /// Suite label written into the test_suite column
    #[arg(short, long, default_value = DEFAULT_SUITE)]
    suite: String,

    /// Also write a JSON metadata file next to the CSV
    #[arg(long)]
    metadata: bool,

    /// Don't print the conversion summary
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), AppError> {
    if args.suite.trim().is_empty() {
        return Err(AppError::Config("Suite label must not be empty".to_string()));
    }

    let options = ConvertOptions {
        input: args.input.clone(),
        output: args.output.clone(),
        suite: args.suite.trim().to_string(),
        write_metadata: args.metadata,
    };

    let outcome = plan::convert(&options)?;

    if !args.quiet {
        println!("{}", outcome.summary.render());
        println!("CSV file saved to: {}", outcome.csv_path.display());
        if let Some(meta) = &outcome.metadata_path {
            println!("Metadata saved to: {}", meta.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting conversion with args: {:?}", args);

    // 3. Convert, reporting expected failures without a crash
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_reportable() => {
            tracing::warn!("{}", e);
            eprintln!("Error: {}", e);
            eprintln!("Conversion failed.");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Conversion aborted: {}", e);
            eprintln!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

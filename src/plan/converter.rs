// src/plan/converter.rs
use std::fs;
use std::path::PathBuf;
use crate::extractors::TestPlanExtractor;
use crate::plan::summary::ConversionSummary;
use crate::storage::StorageManager;
use crate::utils::AppError;

/// Inputs for one Markdown-to-CSV conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub suite: String,
    pub write_metadata: bool,
}

/// What a successful conversion produced.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub summary: ConversionSummary,
    pub csv_path: PathBuf,
    pub metadata_path: Option<PathBuf>,
}

/// Reads the test plan, extracts its steps and writes them out.
///
/// Fails with `InputNotFound` or `NoRecords` before touching the output
/// location; I/O failures while reading or writing surface as they are.
pub fn convert(options: &ConvertOptions) -> Result<ConversionOutcome, AppError> {
    tracing::info!("Converting {} to {}...", options.input.display(), options.output.display());

    if !options.input.exists() {
        return Err(AppError::InputNotFound(options.input.clone()));
    }

    let markdown = fs::read_to_string(&options.input)?;
    let extractor = TestPlanExtractor::new(options.suite.clone());
    let records = extractor.extract(&markdown);

    if records.is_empty() {
        return Err(AppError::NoRecords(options.input.clone()));
    }

    let summary = ConversionSummary::from_records(extractor.suite(), &records);

    let storage = StorageManager::new(&options.output)?;
    let csv_path = storage.save_records(&records)?;
    tracing::info!("Successfully converted {} test steps to {}", records.len(), csv_path.display());

    let metadata_path = if options.write_metadata {
        Some(storage.save_metadata(&summary, &options.input)?)
    } else {
        None
    };

    Ok(ConversionOutcome { summary, csv_path, metadata_path })
}

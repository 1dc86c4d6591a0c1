// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Output side errors: writing the CSV file and the metadata sidecar
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Markdown file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("No test data found in the markdown file '{}'", .0.display())]
    NoRecords(PathBuf),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// True for outcomes that are reported to the user rather than crashes:
    /// a missing source document or a document with no structured steps.
    pub fn is_reportable(&self) -> bool {
        matches!(self, AppError::InputNotFound(_) | AppError::NoRecords(_))
    }
}

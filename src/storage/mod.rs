// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::plan::models::{Record, CSV_COLUMNS};
use crate::plan::summary::ConversionSummary;
use crate::utils::error::StorageError;

pub struct StorageManager {
    csv_path: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager writing to `csv_path`.
    /// The parent directory is created if it doesn't exist.
    pub fn new<P: AsRef<Path>>(csv_path: P) -> Result<Self, StorageError> {
        let csv_path = csv_path.as_ref().to_path_buf();

        if let Some(parent) = csv_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(StorageError::IoError)?;
                tracing::debug!("Created output directory {}", parent.display());
            }
        }

        Ok(Self { csv_path })
    }

    /// Path of the JSON sidecar: `<csv stem>_meta.json` next to the CSV.
    pub fn metadata_path(&self) -> PathBuf {
        let stem = self.csv_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "test_plan".to_string());
        self.csv_path.with_file_name(format!("{}_meta.json", stem))
    }

    /// Writes the header row and one row per record.
    pub fn save_records(&self, records: &[Record]) -> Result<PathBuf, StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.csv_path)?;

        // Header written explicitly so it appears even for an empty slice
        writer.write_record(CSV_COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!("Saved {} rows to {}", records.len(), self.csv_path.display());

        Ok(self.csv_path.clone())
    }

    /// Saves metadata about the conversion in JSON format
    pub fn save_metadata(&self, summary: &ConversionSummary, source: &Path) -> Result<PathBuf, StorageError> {
        let file_path = self.metadata_path();

        let metadata = serde_json::json!({
            "source": source.display().to_string(),
            "output": self.csv_path.display().to_string(),
            "summary": summary,
            "columns": CSV_COLUMNS,
            "conversion_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::models::TestCase;
    use tempfile::TempDir;

    fn sample_records() -> Vec<Record> {
        let mut case = TestCase::new("1.1", "Login, then \"logout\"");
        case.description = "multi\nline".to_string();
        vec![
            Record::new("Suite", &case, 1, "Open page", &["a".to_string(), "b".to_string()]),
            Record::new("Suite", &case, 2, "Close", &[]),
        ]
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("deeper").join("plan.csv");
        let storage = StorageManager::new(&out).unwrap();
        assert!(out.parent().unwrap().is_dir());
        assert_eq!(storage.save_records(&sample_records()).unwrap(), out);
    }

    #[test]
    fn test_csv_header_order_and_quoting() {
        let dir = TempDir::new().unwrap();
        let storage = StorageManager::new(dir.path().join("plan.csv")).unwrap();
        let path = storage.save_records(&sample_records()).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "test_suite,test_case_number,test_case_title,file_path,description,step_number,step_description,expectations"
        );
        assert!(text.contains("\"Login, then \"\"logout\"\"\""));
        assert!(text.contains("\"multi\nline\""));
        assert!(text.contains(",1,Open page,a | b\n"));
        assert!(text.contains(",2,Close,\n"));
    }

    #[test]
    fn test_csv_reads_back() {
        let dir = TempDir::new().unwrap();
        let storage = StorageManager::new(dir.path().join("plan.csv")).unwrap();
        let records = sample_records();
        let path = storage.save_records(&records).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "Login, then \"logout\"");
        assert_eq!(&rows[0][4], "multi\nline");
        assert_eq!(&rows[1][5], "2");
    }

    #[test]
    fn test_metadata_sidecar() {
        let dir = TempDir::new().unwrap();
        let storage = StorageManager::new(dir.path().join("plan.csv")).unwrap();
        let summary = ConversionSummary::from_records("Suite", &sample_records());
        let path = storage.save_metadata(&summary, Path::new("specs/plan.md")).unwrap();

        assert_eq!(path, dir.path().join("plan_meta.json"));
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["source"], "specs/plan.md");
        assert_eq!(value["summary"]["total_test_steps"], 2);
        assert_eq!(value["summary"]["test_cases"][0], "1.1");
        assert!(value["conversion_timestamp"].is_string());
    }
}

// src/plan/summary.rs
use crate::plan::models::Record;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

const SAMPLE_ROWS: usize = 3;
const PREVIEW_CHARS: usize = 100;

/// Totals and a short preview of one conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub suite: String,
    pub total_test_cases: usize,
    pub total_test_steps: usize,
    pub test_cases: Vec<String>, // Sorted, distinct case numbers
    #[serde(skip)]
    pub samples: Vec<Record>,
}

impl ConversionSummary {
    pub fn from_records(suite: &str, records: &[Record]) -> Self {
        let test_cases: Vec<String> = records
            .iter()
            .map(|r| r.case_number.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            suite: suite.to_string(),
            total_test_cases: test_cases.len(),
            total_test_steps: records.len(),
            test_cases,
            samples: records.iter().take(SAMPLE_ROWS).cloned().collect(),
        }
    }

    /// Human-readable report printed after a successful conversion.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "=== Conversion Summary ===");
        let _ = writeln!(out, "Test Suite: {}", self.suite);
        let _ = writeln!(out, "Total Test Cases: {}", self.total_test_cases);
        let _ = writeln!(out, "Total Test Steps: {}", self.total_test_steps);
        let _ = writeln!(out, "Test Cases: {}", self.test_cases.join(", "));

        if !self.samples.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "=== Sample Data (First {} Rows) ===", self.samples.len());
            for (i, record) in self.samples.iter().enumerate() {
                let _ = writeln!(out, "Row {}:", i + 1);
                let _ = writeln!(out, "  Test Case: {} - {}", record.case_number, record.case_title);
                let _ = writeln!(out, "  Step: {} - {}", record.step_index, preview(&record.step_text));
                let _ = writeln!(
                    out,
                    "  Expectations ({}): {}",
                    record.expectation_list().len(),
                    preview(&record.expectations)
                );
            }
        }
        out
    }
}

/// Cuts `text` to at most `PREVIEW_CHARS` characters, marking the cut with "...".
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

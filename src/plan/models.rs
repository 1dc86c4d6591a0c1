// src/plan/models.rs
use serde::Serialize;

/// Suite label written into every row when none is given on the command line.
pub const DEFAULT_SUITE: &str = "EspoCRM Opportunities Management";

/// Separator used to collapse a step's expectation bullets into one CSV cell.
pub const EXPECTATION_DELIMITER: &str = " | ";

/// Column names in output order. Downstream import tooling depends on this.
pub const CSV_COLUMNS: [&str; 8] = [
    "test_suite",
    "test_case_number",
    "test_case_title",
    "file_path",
    "description",
    "step_number",
    "step_description",
    "expectations",
];

/// The test case currently being filled in while scanning a plan.
/// Opened by a `#### <major>.<minor>. <title>` heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCase {
    pub number: String,      // e.g., "1.1"
    pub title: String,       // e.g., "Login Flow"
    pub file_path: String,   // From `**File:** \`...\``, empty until seen
    pub description: String, // From `**Description:** ...`
}

impl TestCase {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// One output row: a numbered step or an actionable bold sub-step.
///
/// Field declaration order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "test_suite")]
    pub suite: String,
    #[serde(rename = "test_case_number")]
    pub case_number: String,
    #[serde(rename = "test_case_title")]
    pub case_title: String,
    pub file_path: String,
    pub description: String,
    #[serde(rename = "step_number")]
    pub step_index: u32,
    #[serde(rename = "step_description")]
    pub step_text: String,
    pub expectations: String,
}

impl Record {
    /// Builds a row for `case`, snapshotting its metadata as it is right now.
    pub fn new(
        suite: &str,
        case: &TestCase,
        step_index: u32,
        step_text: impl Into<String>,
        expectations: &[String],
    ) -> Self {
        Self {
            suite: suite.to_string(),
            case_number: case.number.clone(),
            case_title: case.title.clone(),
            file_path: case.file_path.clone(),
            description: case.description.clone(),
            step_index,
            step_text: step_text.into(),
            expectations: expectations.join(EXPECTATION_DELIMITER),
        }
    }

    /// Splits the collapsed expectations cell back into its bullets.
    pub fn expectation_list(&self) -> Vec<&str> {
        if self.expectations.is_empty() {
            return Vec::new();
        }
        self.expectations.split(EXPECTATION_DELIMITER).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> TestCase {
        let mut case = TestCase::new("2.3", "Edit Opportunity");
        case.file_path = "tests/edit.spec.ts".to_string();
        case
    }

    #[test]
    fn test_record_copies_case_fields() {
        let record = Record::new("Suite", &case(), 4, "Save the record", &[]);
        assert_eq!(record.case_number, "2.3");
        assert_eq!(record.case_title, "Edit Opportunity");
        assert_eq!(record.file_path, "tests/edit.spec.ts");
        assert_eq!(record.description, "");
        assert_eq!(record.step_index, 4);
        assert_eq!(record.expectations, "");
    }

    #[test]
    fn test_expectations_split_back_in_order() {
        let bullets = vec![
            "form is saved".to_string(),
            "toast appears".to_string(),
            "list refreshes".to_string(),
        ];
        let record = Record::new("Suite", &case(), 1, "Click Save", &bullets);
        assert_eq!(record.expectations, "form is saved | toast appears | list refreshes");
        assert_eq!(record.expectation_list(), vec!["form is saved", "toast appears", "list refreshes"]);
    }

    #[test]
    fn test_empty_expectations_split_to_nothing() {
        let record = Record::new("Suite", &case(), 1, "Click Save", &[]);
        assert!(record.expectation_list().is_empty());
    }
}

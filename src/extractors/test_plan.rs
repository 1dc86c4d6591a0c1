// src/extractors/test_plan.rs

// --- Imports ---
use crate::plan::models::{Record, TestCase, EXPECTATION_DELIMITER};
use once_cell::sync::Lazy;
use regex::Regex;

// --- Document Markers ---
const HEADING_MARKER: &str = "####";
const BOLD_MARKER: &str = "**";
const FILE_MARKER: &str = "**File:**";
const DESCRIPTION_MARKER: &str = "**Description:**";
const EXPECT_MARKER: &str = "- expect:";
const BULLET_MARKER: &str = "- ";

// Bullets under a bold sub-step that count as actions. Extend by adding verbs.
const ACTION_VERBS: &[&str] = &[
    "Navigate", "Click", "Fill", "Use", "Test", "Validate", "Verify", "Add", "Save", "Return",
    "Locate", "Edit", "Modify",
];

// --- Regex Patterns (Lazy Static) ---
// `#### 1.2. Create Opportunity` -> ("1.2", "Create Opportunity")
static CASE_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^####\s+(\d+\.\d+)\.\s+(.*)$").expect("Failed to compile CASE_HEADING_RE")
});

// `3. Click the Save button` -> "Click the Save button"
static NUMBERED_STEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s*(.*)$").expect("Failed to compile NUMBERED_STEP_RE")
});

// First backtick-quoted span, used for the `**File:**` path
static BACKTICK_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^`]+)`").expect("Failed to compile BACKTICK_SPAN_RE")
});

// --- Line Classification ---
/// What a single trimmed, non-empty line means at the top level of the scan.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    CaseHeading { number: &'a str, title: &'a str },
    /// `**File:**` line; `None` when it carries no backtick-quoted path.
    File(Option<&'a str>),
    Description(&'a str),
    NumberedStep(&'a str),
    SubStepHeader(String),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(caps) = CASE_HEADING_RE.captures(line) {
        let number = caps.get(1).map_or("", |m| m.as_str());
        let title = caps.get(2).map_or("", |m| m.as_str().trim());
        return LineKind::CaseHeading { number, title };
    }
    if line.starts_with(FILE_MARKER) {
        let path = BACKTICK_SPAN_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        return LineKind::File(path);
    }
    if let Some(rest) = line.strip_prefix(DESCRIPTION_MARKER) {
        return LineKind::Description(rest.trim());
    }
    if let Some(caps) = NUMBERED_STEP_RE.captures(line) {
        return LineKind::NumberedStep(caps.get(1).map_or("", |m| m.as_str().trim()));
    }
    if is_sub_step_header(line) {
        return LineKind::SubStepHeader(line.replace(BOLD_MARKER, "").trim().to_string());
    }
    LineKind::Other
}

/// A line entirely wrapped in bold that is not one of the metadata markers.
fn is_sub_step_header(line: &str) -> bool {
    line.starts_with(BOLD_MARKER)
        && line.ends_with(BOLD_MARKER)
        && !line.starts_with(FILE_MARKER)
        && !line.starts_with(DESCRIPTION_MARKER)
}

/// Lines that end a lookahead window: any level-4 heading, a numbered step,
/// or a bold sub-step header.
fn is_structural_boundary(line: &str) -> bool {
    line.starts_with(HEADING_MARKER) || NUMBERED_STEP_RE.is_match(line) || is_sub_step_header(line)
}

fn expectation_text(line: &str) -> Option<&str> {
    line.strip_prefix(EXPECT_MARKER).map(str::trim)
}

fn action_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(BULLET_MARKER)?;
    ACTION_VERBS
        .iter()
        .any(|verb| rest.starts_with(verb))
        .then_some(rest.trim())
}

// --- Lookahead ---
/// Walks `following` until `stop` matches, handing every non-blank line to
/// `collect`. Unrecognised lines are the collector's business to ignore.
fn look_ahead<'a>(
    following: &[&'a str],
    stop: impl Fn(&str) -> bool,
    mut collect: impl FnMut(&'a str),
) {
    for &line in following {
        if line.is_empty() {
            continue;
        }
        if stop(line) {
            break;
        }
        collect(line);
    }
}

fn collect_step_expectations(following: &[&str]) -> Vec<String> {
    let mut expectations = Vec::new();
    look_ahead(following, is_structural_boundary, |line| {
        if let Some(text) = expectation_text(line) {
            expectations.push(text.to_string());
        }
    });
    expectations
}

fn collect_sub_step_bullets(following: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut actions = Vec::new();
    let mut expectations = Vec::new();
    look_ahead(following, is_structural_boundary, |line| {
        if let Some(text) = action_text(line) {
            actions.push(text.to_string());
        } else if let Some(text) = expectation_text(line) {
            expectations.push(text.to_string());
        }
    });
    (actions, expectations)
}

// --- Extraction ---
/// Scans a Markdown test plan once and returns one record per numbered step
/// or actionable bold sub-step, in document order.
///
/// Never fails: lines that match no known pattern are skipped. An empty
/// result means the document had no recognisable structure.
pub fn extract_records(text: &str, suite: &str) -> Vec<Record> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut records = Vec::new();
    let mut current_case: Option<TestCase> = None;
    let mut step_index: u32 = 0;

    for (i, &line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let following = &lines[i + 1..];

        let kind = classify(line);
        if let LineKind::CaseHeading { number, title } = kind {
            tracing::debug!("Opened test case {} '{}'", number, title);
            current_case = Some(TestCase::new(number, title));
            step_index = 0;
            continue;
        }

        // Nothing attaches to a case that hasn't been opened yet
        let Some(case) = current_case.as_mut() else {
            continue;
        };

        match kind {
            LineKind::File(Some(path)) => case.file_path = path.to_string(),
            LineKind::Description(text) => case.description = text.to_string(),
            LineKind::NumberedStep(text) => {
                step_index += 1;
                let expectations = collect_step_expectations(following);
                tracing::trace!("Case {} step {}: '{}'", case.number, step_index, text);
                records.push(Record::new(suite, case, step_index, text, &expectations));
            }
            LineKind::SubStepHeader(title) => {
                let (actions, expectations) = collect_sub_step_bullets(following);
                if actions.is_empty() && expectations.is_empty() {
                    tracing::trace!("Skipping section label '{}' in case {}", title, case.number);
                    continue;
                }
                step_index += 1;
                let step_text = if actions.is_empty() {
                    title
                } else {
                    format!("{}: {}", title, actions.join(EXPECTATION_DELIMITER))
                };
                tracing::trace!("Case {} sub-step {}: '{}'", case.number, step_index, step_text);
                records.push(Record::new(suite, case, step_index, step_text, &expectations));
            }
            LineKind::File(None) | LineKind::CaseHeading { .. } | LineKind::Other => {}
        }
    }

    records
}

// --- Main Extractor Structure ---
/// Holds the suite label stamped on every record it produces.
pub struct TestPlanExtractor {
    suite: String,
}

impl TestPlanExtractor {
    pub fn new(suite: impl Into<String>) -> Self {
        Self { suite: suite.into() }
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Extracts all step records from the Markdown text of a test plan.
    pub fn extract(&self, markdown: &str) -> Vec<Record> {
        tracing::info!("Extracting test steps for suite '{}' ({} bytes)", self.suite, markdown.len());
        let records = extract_records(markdown, &self.suite);
        if records.is_empty() {
            tracing::warn!("No structured test steps recognised in document");
        } else {
            tracing::info!("Extracted {} test steps", records.len());
        }
        records
    }
}

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const EXPECTED_FIELDS: usize = 2;

/// A line that did not tokenize into exactly two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source.
    pub line: usize,
    pub field_count: usize,
    pub expected: usize,
    pub label: String,
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Skipping line {} with {} instead of {} columns in CSV file {}",
            self.line, self.field_count, self.expected, self.label
        )
    }
}

/// Receives rows the loader discards.
pub trait DiagnosticsSink {
    fn skipped_row(&mut self, row: &SkippedRow);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn skipped_row(&mut self, _row: &SkippedRow) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn skipped_row(&mut self, row: &SkippedRow) {
        warn!(
            line = row.line,
            fields = row.field_count,
            expected = row.expected,
            label = %row.label,
            "Skipping line with {} instead of {} columns in CSV file {}",
            row.field_count,
            row.expected,
            row.label
        );
    }
}

#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    rows: Vec<SkippedRow>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[SkippedRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SkippedRow> {
        self.rows
    }
}

impl DiagnosticsSink for CollectingSink {
    fn skipped_row(&mut self, row: &SkippedRow) {
        self.rows.push(row.clone());
    }
}

/// Forwards every diagnostic to both sinks, first then second.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticsSink, B: DiagnosticsSink> DiagnosticsSink for Tee<A, B> {
    fn skipped_row(&mut self, row: &SkippedRow) {
        self.0.skipped_row(row);
        self.1.skipped_row(row);
    }
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut S {
    fn skipped_row(&mut self, row: &SkippedRow) {
        (**self).skipped_row(row);
    }
}

use std::io::BufRead;

use serde::Serialize;
use tracing::debug;

use crate::csv_processor::diagnostics::{
    CollectingSink, DiagnosticsSink, SkippedRow, Tee, TracingSink, EXPECTED_FIELDS,
};
use crate::csv_processor::tokenizer::{CsvLineTokenizer, LineTokenizer};
use crate::resource::LoadContext;
use crate::translation::{Translation, TranslationTable};
use crate::utils::{Result, TranslationTableError};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// What became of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(Translation),
    Skipped(SkippedRow),
}

/// A loaded table together with the rows that were dropped while loading it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub label: String,
    pub translations: TranslationTable,
    pub skipped: Vec<SkippedRow>,
}

/// Parses two-column CSV into a [`TranslationTable`]. Database values come from
/// the first column, RDF values from the second. Every line is data; there is
/// no header row.
#[derive(Debug, Clone, Default)]
pub struct TranslationTableParser<T = CsvLineTokenizer> {
    tokenizer: T,
}

impl TranslationTableParser<CsvLineTokenizer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: LineTokenizer> TranslationTableParser<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    pub fn parse_row(&self, line_number: usize, line: &str, label: &str) -> RowOutcome {
        let mut fields = self.tokenizer.split_line(line);
        if fields.len() != EXPECTED_FIELDS {
            return RowOutcome::Skipped(SkippedRow {
                line: line_number,
                field_count: fields.len(),
                expected: EXPECTED_FIELDS,
                label: label.to_string(),
            });
        }
        let rdf_value = fields.pop().unwrap_or_default();
        let database_value = fields.pop().unwrap_or_default();
        RowOutcome::Accepted(Translation::new(database_value, rdf_value))
    }

    /// Reads every line of `context`, sending discarded rows to `sink`.
    ///
    /// Lines are decoded as UTF-8, with invalid sequences replaced by U+FFFD.
    /// A byte order mark is dropped from the first line only. A read failure
    /// aborts the load and the rows accepted so far are dropped.
    /// The context is consumed, so a stream opened from a location is closed
    /// on every return path.
    pub fn load_into<S>(&self, context: LoadContext<'_>, sink: &mut S) -> Result<TranslationTable>
    where
        S: DiagnosticsSink + ?Sized,
    {
        let (mut reader, label) = context.into_parts();
        let mut table = TranslationTable::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|source| {
                TranslationTableError::TranslationLoad {
                    label: label.clone(),
                    source,
                }
            })?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let mut bytes = trim_line_ending(&buf);
            if line_number == 1 {
                bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            }
            let line = String::from_utf8_lossy(bytes);

            match self.parse_row(line_number, &line, &label) {
                RowOutcome::Accepted(translation) => table.push(translation),
                RowOutcome::Skipped(row) => sink.skipped_row(&row),
            }
        }

        debug!(label = %label, translations = table.len(), "Parsed translation table");
        Ok(table)
    }

    /// Loads `context`, logging and collecting skipped rows.
    pub fn load(&self, context: LoadContext<'_>) -> Result<LoadReport> {
        let label = context.label().to_string();
        let mut sink = Tee(TracingSink, CollectingSink::new());
        let translations = self.load_into(context, &mut sink)?;

        Ok(LoadReport {
            label,
            translations,
            skipped: sink.1.into_rows(),
        })
    }
}

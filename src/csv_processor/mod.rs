pub mod diagnostics;
pub mod reader;
pub mod tokenizer;

pub use diagnostics::{
    CollectingSink, DiagnosticsSink, NoopSink, SkippedRow, Tee, TracingSink, EXPECTED_FIELDS,
};
pub use reader::{LoadReport, RowOutcome, TranslationTableParser};
pub use tokenizer::{CsvLineTokenizer, LineTokenizer};

use tracing::info;

use crate::resource::{ResourceOpener, ResourceRef};
use crate::utils::{AppConfig, Result};

/// Opens `resource` with the configured resolver and retriever and loads it,
/// logging every skipped row.
pub fn load_translation_table(resource: ResourceRef<'_>, config: &AppConfig) -> Result<LoadReport> {
    let opener = ResourceOpener::from_config(config)?;
    let tokenizer = CsvLineTokenizer::new().with_delimiter(config.csv.delimiter_byte()?);

    let context = opener.open(resource)?;
    let report = TranslationTableParser::with_tokenizer(tokenizer).load(context)?;

    info!(
        label = %report.label,
        translations = report.translations.len(),
        skipped = report.skipped.len(),
        "Loaded translation table"
    );
    Ok(report)
}

pub mod csv_processor;
pub mod resource;
pub mod translation;
pub mod utils;

pub use csv_processor::{
    load_translation_table, CollectingSink, CsvLineTokenizer, DiagnosticsSink, LineTokenizer,
    LoadReport, NoopSink, RowOutcome, SkippedRow, TracingSink, TranslationTableParser,
};
pub use resource::{
    LoadContext, LocationResolver, ResourceOpener, ResourceRef, Retriever, StandardRetriever,
    UrlResolver,
};
pub use translation::{Translation, TranslationTable};
pub use utils::{AppConfig, Result, TranslationTableError};

pub mod config;
pub mod errors;

pub use config::{AppConfig, CsvConfig, HttpConfig, LoggingConfig, ResolverConfig};
pub use errors::{BoxError, Result, TranslationTableError};

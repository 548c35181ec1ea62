use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum TranslationTableError {
    #[error("Malformed URI: {0}")]
    InvalidLocation(String),

    #[error("File not found at URL: {0}")]
    ResourceNotFound(String),

    #[error("Error reading from translation table: {location}: {source}")]
    ResourceAccess {
        location: String,
        #[source]
        source: BoxError,
    },

    #[error("Error loading translation table from {label}: {source}")]
    TranslationLoad {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TranslationTableError {
    pub fn access(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ResourceAccess {
            location: location.into(),
            source: source.into(),
        }
    }

    /// True for failures raised while resolving or opening a resource, before
    /// any line was read.
    pub fn is_open_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLocation(_) | Self::ResourceNotFound(_) | Self::ResourceAccess { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TranslationTableError>;

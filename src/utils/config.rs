use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::errors::{Result, TranslationTableError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub http: HttpConfig,
    pub csv: CsvConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base against which relative locations are resolved. Falls back to the
    /// current working directory when unset.
    pub base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_seconds: u64,
    /// Bound on the whole request including the body. Unset means slow
    /// transfers are not cut off once connected.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            timeout_seconds: None,
            user_agent: concat!("translation-table/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| {
                TranslationTableError::ConfigError(format!(
                    "CSV delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationTableError::ConfigError(format!("{}: {}", path, e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TranslationTableError::ConfigError(e.to_string()))
    }

    pub fn load_or_default(path: Option<&str>) -> Self {
        if let Some(p) = path {
            Self::load_from_file(p).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [resolver]
            base = "http://example.org/mappings/"

            [http]
            connect_timeout_seconds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver.base.as_deref(), Some("http://example.org/mappings/"));
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.http.timeout(), None);
        assert!(config.http.user_agent.starts_with("translation-table/"));
        assert_eq!(config.csv.delimiter, ',');
        assert_eq!(config.logging.level, "info");
    }

    #[rstest]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[csv]\ndelimiter = \";\"\n").unwrap();

        let config = AppConfig::load_from_file(path.to_str().unwrap()).unwrap();

        assert_eq!(config.csv.delimiter_byte().unwrap(), b';');
    }

    #[rstest]
    fn test_malformed_toml_is_config_error() {
        let result = AppConfig::from_toml_str("[http\ntimeout_seconds = ");
        assert!(matches!(result, Err(TranslationTableError::ConfigError(_))));
    }

    #[rstest]
    fn test_missing_file_falls_back_to_default() {
        let config = AppConfig::load_or_default(Some("/nonexistent/translation-table.toml"));
        assert!(config.resolver.base.is_none());
        assert_eq!(config.http.connect_timeout_seconds, 10);
        assert!(config.http.timeout_seconds.is_none());
    }

    #[rstest]
    #[case('\t', Some(b'\t'))]
    #[case('|', Some(b'|'))]
    #[case('é', None)]
    fn test_delimiter_byte(#[case] delimiter: char, #[case] expected: Option<u8>) {
        let csv = CsvConfig { delimiter };
        assert_eq!(csv.delimiter_byte().ok(), expected);
    }
}

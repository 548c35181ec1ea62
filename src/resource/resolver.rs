use std::path::Path;

use url::Url;

use crate::utils::{Result, TranslationTableError};

/// Turns a location string into a canonical absolute URL.
pub trait LocationResolver {
    fn resolve(&self, raw: &str) -> Result<Url>;
}

/// Resolves relative references against a base URL, or against the current
/// working directory when no base is configured.
#[derive(Debug, Clone, Default)]
pub struct UrlResolver {
    base: Option<Url>,
}

impl UrlResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: Url) -> Self {
        Self { base: Some(base) }
    }

    /// Builds a resolver from a configured base, which may itself be a
    /// relative reference or a filesystem path.
    pub fn from_base_str(base: &str) -> Result<Self> {
        let base = Self::new().resolve(base)?;
        Ok(Self::with_base(base))
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    fn base_or_cwd(&self) -> Result<Url> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        let cwd = std::env::current_dir()
            .map_err(|e| TranslationTableError::access("current directory", e))?;
        Url::from_directory_path(&cwd)
            .map_err(|_| TranslationTableError::InvalidLocation(cwd.display().to_string()))
    }
}

impl LocationResolver for UrlResolver {
    fn resolve(&self, raw: &str) -> Result<Url> {
        let invalid = || TranslationTableError::InvalidLocation(raw.to_string());

        if raw.is_empty() {
            return Err(invalid());
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            let url = if raw.ends_with(std::path::is_separator) {
                Url::from_directory_path(path)
            } else {
                Url::from_file_path(path)
            };
            return url.map_err(|_| invalid());
        }

        if raw.chars().any(is_illegal_iri_char) {
            return Err(invalid());
        }
        if let Some(scheme) = scheme_prefix(raw) {
            if !is_valid_scheme(scheme) {
                return Err(invalid());
            }
        }

        let base = self.base_or_cwd()?;
        Url::options()
            .base_url(Some(&base))
            .parse(raw)
            .map_err(|_| invalid())
    }
}

fn is_illegal_iri_char(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
}

/// Text before the first `:` when no path, query or fragment delimiter
/// precedes it.
fn scheme_prefix(raw: &str) -> Option<&str> {
    let end = raw.find(|c| matches!(c, ':' | '/' | '?' | '#'))?;
    raw[end..].starts_with(':').then(|| &raw[..end])
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolver() -> UrlResolver {
        UrlResolver::with_base(Url::parse("http://example.org/mappings/main.ttl").unwrap())
    }

    #[rstest]
    #[case("table.csv", "http://example.org/mappings/table.csv")]
    #[case("../tables/t.csv", "http://example.org/tables/t.csv")]
    #[case("/root.csv", "file:///root.csv")]
    #[case("https://other.org/t.csv", "https://other.org/t.csv")]
    #[case("file:///tmp/t.csv", "file:///tmp/t.csv")]
    #[case("t.csv?v=1#frag", "http://example.org/mappings/t.csv?v=1#frag")]
    fn test_resolve(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(resolver().resolve(raw).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("ht!tp://bad uri")]
    #[case("ht!tp://bad")]
    #[case("")]
    #[case("table with space.csv")]
    #[case("1http://example.org/")]
    #[case("<table.csv>")]
    #[case("http://[::1")]
    fn test_resolve_invalid(#[case] raw: &str) {
        match resolver().resolve(raw) {
            Err(TranslationTableError::InvalidLocation(s)) => assert_eq!(s, raw),
            other => panic!("expected InvalidLocation for {:?}, got {:?}", raw, other),
        }
    }

    #[rstest]
    fn test_relative_to_cwd_without_base() {
        let url = UrlResolver::new().resolve("table.csv").unwrap();
        let expected = std::env::current_dir().unwrap().join("table.csv");
        assert_eq!(url.to_file_path().unwrap(), expected);
    }

    #[rstest]
    fn test_from_base_str_accepts_directory_path() {
        let resolver = UrlResolver::from_base_str("http://example.org/dir/").unwrap();
        assert_eq!(
            resolver.resolve("t.csv").unwrap().as_str(),
            "http://example.org/dir/t.csv"
        );
    }

    #[rstest]
    fn test_directory_path_base_keeps_trailing_slash() {
        let resolver = UrlResolver::from_base_str("/srv/tables/").unwrap();
        assert_eq!(
            resolver.resolve("t.csv").unwrap().as_str(),
            "file:///srv/tables/t.csv"
        );
    }

    #[rstest]
    #[case("http:x", Some("http"))]
    #[case("a/b:c", None)]
    #[case("plain", None)]
    fn test_scheme_prefix(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(scheme_prefix(raw), expected);
    }
}

pub mod resolver;
pub mod retriever;

pub use resolver::{LocationResolver, UrlResolver};
pub use retriever::{Retriever, StandardRetriever};

use std::io::{BufRead, BufReader, Read};

use tracing::info;

use crate::utils::{AppConfig, Result};

pub const STREAM_LABEL: &str = "<stream>";

/// Where a translation table comes from.
pub enum ResourceRef<'a> {
    /// An already open stream. Pass `&mut reader` to keep ownership of it.
    Stream {
        data: Box<dyn Read + 'a>,
        label: Option<String>,
    },
    /// A possibly relative location, resolved before opening.
    Location(String),
}

impl<'a> ResourceRef<'a> {
    pub fn stream(data: impl Read + 'a) -> Self {
        Self::Stream {
            data: Box::new(data),
            label: None,
        }
    }

    pub fn named_stream(data: impl Read + 'a, label: impl Into<String>) -> Self {
        Self::Stream {
            data: Box::new(data),
            label: Some(label.into()),
        }
    }

    pub fn location(location: impl Into<String>) -> Self {
        Self::Location(location.into())
    }
}

impl std::fmt::Debug for ResourceRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stream { label, .. } => f.debug_struct("Stream").field("label", label).finish(),
            Self::Location(location) => f.debug_tuple("Location").field(location).finish(),
        }
    }
}

impl From<&str> for ResourceRef<'_> {
    fn from(location: &str) -> Self {
        Self::location(location)
    }
}

impl From<String> for ResourceRef<'_> {
    fn from(location: String) -> Self {
        Self::Location(location)
    }
}

/// An open line reader and the label used when reporting on it. Dropping the
/// context drops the reader.
pub struct LoadContext<'a> {
    reader: Box<dyn BufRead + 'a>,
    label: String,
}

impl<'a> LoadContext<'a> {
    pub fn from_reader(reader: impl Read + 'a, label: impl Into<String>) -> Self {
        Self {
            reader: Box::new(BufReader::new(reader)),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn into_parts(self) -> (Box<dyn BufRead + 'a>, String) {
        (self.reader, self.label)
    }
}

impl std::fmt::Debug for LoadContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadContext")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Turns a [`ResourceRef`] into a [`LoadContext`].
#[derive(Debug, Clone, Default)]
pub struct ResourceOpener<R = UrlResolver, T = StandardRetriever> {
    resolver: R,
    retriever: T,
}

impl ResourceOpener {
    /// Resolves against the working directory and retrieves with default HTTP
    /// settings.
    pub fn standard() -> Self {
        Self::new(UrlResolver::new(), StandardRetriever::default())
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let resolver = match config.resolver.base.as_deref() {
            Some(base) => UrlResolver::from_base_str(base)?,
            None => UrlResolver::new(),
        };
        Ok(Self::new(resolver, StandardRetriever::new(config.http.clone())))
    }
}

impl<R: LocationResolver, T: Retriever> ResourceOpener<R, T> {
    pub fn new(resolver: R, retriever: T) -> Self {
        Self {
            resolver,
            retriever,
        }
    }

    pub fn open<'a>(&self, resource: ResourceRef<'a>) -> Result<LoadContext<'a>> {
        match resource {
            ResourceRef::Stream { data, label } => Ok(LoadContext::from_reader(
                data,
                label.unwrap_or_else(|| STREAM_LABEL.to_string()),
            )),
            ResourceRef::Location(raw) => {
                let url = self.resolver.resolve(&raw)?;
                let data = self.retriever.open(&url)?;
                info!(location = %raw, url = %url, "Opened translation table");
                Ok(LoadContext::from_reader(data, url.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TranslationTableError;
    use rstest::rstest;
    use std::cell::Cell;
    use url::Url;

    #[derive(Default)]
    struct CountingRetriever {
        opened: Cell<usize>,
    }

    impl Retriever for CountingRetriever {
        fn open(&self, _location: &Url) -> Result<Box<dyn Read + Send>> {
            self.opened.set(self.opened.get() + 1);
            Ok(Box::new(&b"a,b\n"[..]))
        }
    }

    #[rstest]
    fn test_stream_gets_generic_label() {
        let opener = ResourceOpener::standard();
        let context = opener.open(ResourceRef::stream(&b""[..])).unwrap();
        assert_eq!(context.label(), STREAM_LABEL);

        let context = opener
            .open(ResourceRef::named_stream(&b""[..], "inline"))
            .unwrap();
        assert_eq!(context.label(), "inline");
    }

    #[rstest]
    fn test_location_label_is_canonical_url() {
        let base = Url::parse("http://example.org/maps/").unwrap();
        let opener = ResourceOpener::new(UrlResolver::with_base(base), CountingRetriever::default());

        let context = opener.open(ResourceRef::location("t.csv")).unwrap();

        assert_eq!(context.label(), "http://example.org/maps/t.csv");
        assert_eq!(opener.retriever.opened.get(), 1);
    }

    #[rstest]
    fn test_invalid_location_opens_nothing() {
        let opener = ResourceOpener::new(UrlResolver::new(), CountingRetriever::default());

        let result = opener.open(ResourceRef::from("ht!tp://bad uri"));

        assert!(matches!(result, Err(TranslationTableError::InvalidLocation(_))));
        assert_eq!(opener.retriever.opened.get(), 0);
    }

    #[rstest]
    fn test_borrowed_stream_stays_with_caller() {
        let mut data: &[u8] = b"a,b\nc,d\n";
        {
            let opener = ResourceOpener::standard();
            let _context = opener.open(ResourceRef::stream(&mut data)).unwrap();
        }
        let mut rest = String::new();
        data.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "a,b\nc,d\n");
    }
}

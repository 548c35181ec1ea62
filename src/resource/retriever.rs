use std::fs::File;
use std::io::{self, Read};
use std::sync::OnceLock;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::utils::{HttpConfig, Result, TranslationTableError};

/// Opens a byte stream for a canonical location.
///
/// Implementations report an absent resource as
/// [`TranslationTableError::ResourceNotFound`] and every other failure as
/// [`TranslationTableError::ResourceAccess`].
pub trait Retriever {
    fn open(&self, location: &Url) -> Result<Box<dyn Read + Send>>;
}

/// Supports `file`, `http` and `https` locations. The HTTP client is built on
/// first use and shared by every later request.
#[derive(Debug, Clone, Default)]
pub struct StandardRetriever {
    http: HttpConfig,
    client: OnceLock<Client>,
}

impl StandardRetriever {
    pub fn new(http: HttpConfig) -> Self {
        Self {
            http,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> std::result::Result<&Client, reqwest::Error> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let built = Client::builder()
            .connect_timeout(self.http.connect_timeout())
            .timeout(self.http.timeout())
            .user_agent(self.http.user_agent.as_str())
            .build()?;
        Ok(self.client.get_or_init(|| built))
    }

    fn open_file(&self, location: &Url) -> Result<Box<dyn Read + Send>> {
        let path = location.to_file_path().map_err(|_| {
            TranslationTableError::access(
                location.as_str(),
                io::Error::new(io::ErrorKind::InvalidInput, "not a local file path"),
            )
        })?;

        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TranslationTableError::ResourceNotFound(location.to_string()),
            _ => TranslationTableError::access(location.as_str(), e),
        })?;

        let metadata = file
            .metadata()
            .map_err(|e| TranslationTableError::access(location.as_str(), e))?;
        if metadata.is_dir() {
            return Err(TranslationTableError::access(
                location.as_str(),
                io::Error::new(io::ErrorKind::InvalidInput, "location is a directory"),
            ));
        }

        debug!(path = %path.display(), size = metadata.len(), "Opened translation table file");
        Ok(Box::new(file))
    }

    fn open_http(&self, location: &Url) -> Result<Box<dyn Read + Send>> {
        let client = self
            .client()
            .map_err(|e| TranslationTableError::access(location.as_str(), e))?;

        let response = client
            .get(location.clone())
            .send()
            .map_err(|e| TranslationTableError::access(location.as_str(), e))?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                Err(TranslationTableError::ResourceNotFound(location.to_string()))
            }
            s if !s.is_success() => Err(TranslationTableError::access(
                location.as_str(),
                format!("HTTP status {}", s),
            )),
            _ => {
                debug!(url = %location, status = %status, "Opened translation table URL");
                Ok(Box::new(response))
            }
        }
    }
}

impl Retriever for StandardRetriever {
    fn open(&self, location: &Url) -> Result<Box<dyn Read + Send>> {
        match location.scheme() {
            "file" => self.open_file(location),
            "http" | "https" => self.open_http(location),
            other => Err(TranslationTableError::access(
                location.as_str(),
                format!("unsupported URL scheme: {}", other),
            )),
        }
    }
}

//! Places an external blocked-term list can be fetched from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::TermsConfig;
use crate::errors::FormguardError;

/// A resource holding comma/newline separated blocked terms.
///
/// Fetching is the only suspending step of the whole filter pipeline.
#[async_trait]
pub trait TermSource: Send + Sync {
    /// Human-readable location, used in logs and errors.
    fn describe(&self) -> String;

    /// Returns the raw, unparsed term text.
    async fn fetch(&self) -> Result<String, FormguardError>;
}

/// Fetches terms over HTTP(S).
#[derive(Debug, Clone)]
pub struct UrlTermSource {
    url: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl UrlTermSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn error(&self, e: impl ToString) -> FormguardError {
        FormguardError::TermSource(self.url.clone(), e.to_string())
    }
}

#[async_trait]
impl TermSource for UrlTermSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, FormguardError> {
        let mut request = self.client.get(&self.url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await.map_err(|e| self.error(e))?;
        let response = response.error_for_status().map_err(|e| self.error(e))?;
        response.text().await.map_err(|e| self.error(e))
    }
}

/// Reads terms from a local file.
#[derive(Debug, Clone)]
pub struct FileTermSource {
    path: PathBuf,
}

impl FileTermSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TermSource for FileTermSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, FormguardError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FormguardError::TermSource(self.describe(), e.to_string()))
    }
}

/// In-memory term text.
#[derive(Debug, Clone, Default)]
pub struct StaticTermSource {
    text: String,
}

impl StaticTermSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TermSource for StaticTermSource {
    fn describe(&self) -> String {
        "<inline>".to_string()
    }

    async fn fetch(&self) -> Result<String, FormguardError> {
        Ok(self.text.clone())
    }
}

/// The term source named by the configuration, if any.
pub fn term_source_from_config(config: &TermsConfig) -> Option<Box<dyn TermSource>> {
    if let Some(url) = &config.url {
        let mut source = UrlTermSource::new(url.clone());
        if let Some(secs) = config.timeout_secs {
            source = source.with_timeout(Duration::from_secs(secs));
        }
        return Some(Box::new(source));
    }
    config
        .path
        .as_ref()
        .map(|path| Box::new(FileTermSource::new(path.clone())) as Box<dyn TermSource>)
}

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::error::SourceError;
use crate::shared::config::SourceConfig;

/// Where the CSV text comes from
#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String, SourceError>;

    /// URL or path, for logging
    fn describe(&self) -> String;
}

/// Published spreadsheet fetched over HTTP
pub struct HttpCsvSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    async fn fetch_text(&self) -> Result<String, SourceError> {
        tracing::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Local CSV file, for offline work and demos
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileCsvSource {
    async fn fetch_text(&self) -> Result<String, SourceError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source named by `[source] url`
pub fn source_from_config(config: &SourceConfig) -> Result<Box<dyn CsvSource>, SourceError> {
    let url = config.url.trim();
    if config.is_remote() {
        Ok(Box::new(HttpCsvSource::new(url, config.fetch_timeout())?))
    } else {
        Ok(Box::new(FileCsvSource::new(url)))
    }
}

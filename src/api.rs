//! Data loading for the author timeline.
//!
//! One fetch per render pass: a JSON array of `AuthorRecord`s from either an
//! HTTP endpoint or a local file. Any failure (connection, non-2xx status,
//! IO, JSON parse) aborts the pass and surfaces as a single error message;
//! there is no retry and no partial result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::models::AuthorRecord;

/// Default API base URL; the author data is served under `/data`.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Relative path of the author data on the server.
const AUTHORS_PATH: &str = "data/authors.json";

/// Where the author data comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Fetch `<base>/data/authors.json` over HTTP.
    Url(String),
    /// Read a JSON file from disk.
    File(PathBuf),
}

impl DataSource {
    /// Interpret a command line argument: anything that looks like a URL is
    /// a base URL, the rest is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg.trim_end_matches('/').to_string())
        } else {
            DataSource::File(PathBuf::from(arg))
        }
    }

    /// Human-readable description for the log pane.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Url(base) => format!("{}/{}", base, AUTHORS_PATH),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_BASE_URL.to_string())
    }
}

/// Client for the author data source.
#[derive(Debug, Clone)]
pub struct DataClient {
    client: Client,
    source: DataSource,
}

impl DataClient {
    pub fn new(source: DataSource) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, source })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Load the full author list. Non-2xx status is fatal for the pass.
    pub async fn fetch_authors(&self) -> Result<Vec<AuthorRecord>> {
        match &self.source {
            DataSource::Url(base) => {
                let url = format!("{}/{}", base, AUTHORS_PATH);

                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch {}", url))?;

                if !response.status().is_success() {
                    anyhow::bail!(
                        "HTTP error fetching {}: {} - {}",
                        url,
                        response.status(),
                        response.text().await.unwrap_or_default()
                    );
                }

                response
                    .json()
                    .await
                    .context("Failed to parse author data")
            }
            DataSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("Failed to parse {}", path.display()))
            }
        }
    }
}

/// Messages sent from the data worker to the main TUI thread.
#[derive(Debug, Clone)]
pub enum DataMessage {
    /// Author records have been loaded.
    AuthorsLoaded(Vec<AuthorRecord>),
    /// The load failed; the string is the failure description shown to the
    /// user and written to the log.
    Error(String),
}

/// Commands sent from the TUI to the data worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCommand {
    /// Reload the author data.
    Refresh,
    /// Shut the worker down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_arg() {
        assert!(matches!(
            DataSource::from_arg("http://localhost:8000/"),
            DataSource::Url(base) if base == "http://localhost:8000"
        ));
        assert!(matches!(
            DataSource::from_arg("data/authors.json"),
            DataSource::File(_)
        ));
    }

    #[test]
    fn test_describe_appends_data_path() {
        let source = DataSource::Url("http://localhost:8000".to_string());
        assert_eq!(source.describe(), "http://localhost:8000/data/authors.json");
    }
}

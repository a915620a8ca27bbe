//! Upgrade-phase indexing: fetch the precomputed site-wide index.
//!
//! Any failure here is an expected degraded mode. The error type exists so the
//! caller can log *why* it kept the scraped index, not to surface to users.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

use crate::model::types::SearchEntry;

#[derive(Error, Debug)]
pub enum RemoteIndexError {
    #[error("invalid index URL {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("payload is not a JSON array")]
    NotAnArray,

    #[error("payload is an empty array")]
    Empty,

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Somewhere a complete corpus can be loaded from.
pub trait IndexSource {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Vec<SearchEntry>, RemoteIndexError>> + Send;
}

/// Validate a `/search.json` body: a non-empty array of entries.
pub fn parse_payload(body: &[u8]) -> Result<Vec<SearchEntry>, RemoteIndexError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    let serde_json::Value::Array(items) = value else {
        return Err(RemoteIndexError::NotAnArray);
    };
    if items.is_empty() {
        return Err(RemoteIndexError::Empty);
    }
    let entries = items
        .into_iter()
        .map(serde_json::from_value::<SearchEntry>)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// `GET <site_root><remote_path>` over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpIndexSource {
    client: Client,
    url: Url,
}

impl HttpIndexSource {
    /// `remote_path` is site-root-relative: `/search.json` against
    /// `https://host/blog/` resolves to `https://host/search.json`.
    pub fn new(site_root: &str, remote_path: &str, timeout: Duration) -> Result<Self, RemoteIndexError> {
        let base =
            Url::parse(site_root).map_err(|_| RemoteIndexError::InvalidUrl(site_root.to_string()))?;
        let url = base
            .join(remote_path)
            .map_err(|_| RemoteIndexError::InvalidUrl(format!("{site_root} + {remote_path}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl IndexSource for HttpIndexSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<SearchEntry>, RemoteIndexError> {
        debug!(component = "remote_index", url = %self.url, "fetching remote index");
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteIndexError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }
        let body = response.bytes().await?;
        parse_payload(&body)
    }
}

/// The same index read from a built site directory (`_site/search.json`).
#[derive(Debug, Clone)]
pub struct DirIndexSource {
    path: PathBuf,
}

impl DirIndexSource {
    pub fn new(site_dir: &Path, remote_path: &str) -> Self {
        Self {
            path: site_dir.join(remote_path.trim_start_matches('/')),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for DirIndexSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<SearchEntry>, RemoteIndexError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RemoteIndexError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_payload(&body)
    }
}

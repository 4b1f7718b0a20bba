//! Where the encoded wind raster comes from.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wind_common::{WindError, WindResult};

/// A fetcher for the raw bytes of the source raster.
#[async_trait]
pub trait RasterSource: Send + Sync {
    /// Fetch the encoded raster. Called once per (re)load.
    async fn fetch(&self) -> WindResult<Bytes>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}

/// Raster stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileRasterSource {
    path: PathBuf,
}

impl FileRasterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RasterSource for FileRasterSource {
    async fn fetch(&self) -> WindResult<Bytes> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            WindError::RasterFetch(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = data.len(), "Read raster file");
        Ok(Bytes::from(data))
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Raster served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpRasterSource {
    url: String,
    client: reqwest::Client,
}

impl HttpRasterSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RasterSource for HttpRasterSource {
    async fn fetch(&self) -> WindResult<Bytes> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| WindError::RasterFetch(format!("{}: {}", self.url, e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| WindError::RasterFetch(format!("{}: {}", self.url, e)))?;
        debug!(url = %self.url, bytes = body.len(), "Downloaded raster");
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Raster already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryRasterSource {
    bytes: Bytes,
}

impl MemoryRasterSource {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl RasterSource for MemoryRasterSource {
    async fn fetch(&self) -> WindResult<Bytes> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} bytes)", self.bytes.len())
    }
}

/// Configured raster location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RasterLocation {
    File { path: PathBuf },
    Http { url: String },
}

impl RasterLocation {
    /// Build the matching source.
    pub fn into_source(self) -> Arc<dyn RasterSource> {
        match self {
            RasterLocation::File { path } => Arc::new(FileRasterSource::new(path)),
            RasterLocation::Http { url } => Arc::new(HttpRasterSource::new(url)),
        }
    }
}

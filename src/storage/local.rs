//! Local filesystem cache store.
//!
//! ## File Layout
//!
//! ```text
//! {
//!   "version": 1,
//!   "saved_at": "2026-01-01T00:00:00Z",
//!   "entries": { "<url>": "<raw body>", ... }
//! }
//! ```
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the cache
//! file, so a failed save never leaves a truncated cache behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{CacheStore, Entries};

/// Current on-disk format version.
pub const CACHE_VERSION: u32 = 1;

#[derive(Serialize)]
struct CacheFileRef<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    entries: &'a Entries,
}

#[derive(Deserialize)]
struct CacheFile {
    version: u32,
    entries: Entries,
}

/// File-backed cache store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.tmp_path();
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl CacheStore for LocalStore {
    async fn read(&self) -> Result<Option<Entries>> {
        let Some(bytes) = self.read_bytes().await.map_err(AppError::cache_load)? else {
            return Ok(None);
        };

        let file: CacheFile = serde_json::from_slice(&bytes).map_err(AppError::cache_load)?;
        if file.version != CACHE_VERSION {
            return Err(AppError::cache_load(format!(
                "unsupported cache version {} (expected {})",
                file.version, CACHE_VERSION
            )));
        }
        Ok(Some(file.entries))
    }

    async fn write(&self, entries: &Entries) -> Result<()> {
        let file = CacheFileRef {
            version: CACHE_VERSION,
            saved_at: Utc::now(),
            entries,
        };
        let bytes = serde_json::to_vec(&file).map_err(AppError::cache_save)?;
        self.write_bytes(&bytes)
            .await
            .map_err(|e| AppError::cache_save(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

//! File-based image storage

use crate::error::{CacheError, Result};
use crate::key::CacheKey;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

/// Sequence number for staging files, unique within the process
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// An image cache that stores one file per key under a root directory
#[derive(Debug, Clone)]
pub struct ImageCache {
    /// Directory where cached images are stored
    cache_dir: PathBuf,
}

impl ImageCache {
    /// Create a new image cache rooted at `cache_dir`
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Initialize the cache by ensuring the cache directory exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir).await.map_err(io_failure)?;
        let removed = self.sweep_staging_files().await?;
        info!(cache_dir = ?self.cache_dir, removed, "Cache initialized");
        Ok(())
    }

    /// Remove staging files left behind by writes that never reached the rename
    async fn sweep_staging_files(&self) -> Result<usize> {
        let mut removed = 0;
        let mut dir = fs::read_dir(&self.cache_dir).await.map_err(io_failure)?;

        while let Some(entry) = dir.next_entry().await.map_err(io_failure)? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !is_staging_name(&name) {
                continue;
            }
            match fs::remove_file(entry.path()).await {
                Ok(()) => {
                    debug!(file = %name, "Removed stale staging file");
                    removed += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(file = %name, error = %e, "Failed to remove stale staging file"),
            }
        }

        Ok(removed)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Read the cached image for `key`
    pub async fn read(&self, key: &CacheKey) -> Result<Vec<u8>> {
        let data = fs::read(self.path_for(key)).await?;
        debug!(key = %key, size = data.len(), "Cache hit");
        Ok(data)
    }

    /// Create or replace the cached image for `key`.
    ///
    /// The data is staged in a hidden sibling file and renamed into place, so
    /// a concurrent reader sees either the old entry or the new one.
    pub async fn write(&self, key: &CacheKey, data: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        let staging = self.staging_path(key);

        if let Err(e) = fs::write(&staging, data).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_failure(e));
        }
        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_failure(e));
        }

        debug!(key = %key, size = data.len(), "Cached image");
        Ok(())
    }

    /// Remove the cached image for `key`
    pub async fn delete(&self, key: &CacheKey) -> Result<()> {
        fs::remove_file(self.path_for(key)).await?;
        debug!(key = %key, "Removed cached image");
        Ok(())
    }

    /// Whether an entry exists for `key`
    pub async fn contains(&self, key: &CacheKey) -> Result<bool> {
        fs::try_exists(self.path_for(key)).await.map_err(io_failure)
    }

    fn staging_path(&self, key: &CacheKey) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.cache_dir.join(format!(
            ".{}.{}.{}.tmp",
            key.file_name(),
            std::process::id(),
            seq
        ))
    }
}

fn is_staging_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}

/// Errors on paths where absence is not a meaningful outcome
fn io_failure(err: io::Error) -> CacheError {
    CacheError::Io(Box::new(err))
}

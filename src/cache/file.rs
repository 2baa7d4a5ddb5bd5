//! Directory-backed store: one JSON file per key.

use super::backend::KeyValueStore;
use super::key::CacheKey;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

const EXTENSION: &str = "cache";

#[derive(Serialize, Deserialize)]
struct Envelope {
    /// Unix time in milliseconds after which the entry is stale.
    expires_at_ms: u64,
    value: String,
}

/// Persists entries under a directory so they survive process restarts.
///
/// Expired files are removed lazily when read. Zero TTL behaves like
/// [`MemoryStore`](super::MemoryStore): the entry is dropped, not written.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create the store, creating `dir` if it does not exist.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        let file: String = key
            .hash
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.{}", file, EXTENSION))
    }

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    async fn read_envelope(path: &Path) -> Result<Option<Envelope>> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<Envelope>(&raw) {
            Ok(env) => Ok(Some(env)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "discarding unreadable cache file");
                Ok(None)
            }
        }
    }

    async fn remove(path: &Path) -> Result<bool> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn cache_files(&self) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(EXTENSION) {
                out.push(path);
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        let Some(env) = Self::read_envelope(&path).await? else {
            return Ok(None);
        };
        if Self::now_ms() >= env.expires_at_ms {
            Self::remove(&path).await?;
            return Ok(None);
        }
        let value = base64::engine::general_purpose::STANDARD
            .decode(env.value.as_bytes())
            .map_err(|e| {
                Error::cache_with_context(
                    "corrupt cache file",
                    ErrorContext::new()
                        .with_field_path(path.display().to_string())
                        .with_details(e.to_string())
                        .with_source("file_store"),
                )
            })?;
        Ok(Some(value))
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()> {
        let path = self.path_for(key);
        if ttl.is_zero() {
            Self::remove(&path).await?;
            return Ok(());
        }
        let env = Envelope {
            expires_at_ms: Self::now_ms()
                .saturating_add(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)),
            value: base64::engine::general_purpose::STANDARD.encode(value),
        };
        let raw = serde_json::to_vec(&env)?;
        // write-then-rename so concurrent readers never observe a partial file
        let tmp = path.with_extension(format!("{}.{}", EXTENSION, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        Self::remove(&self.path_for(key)).await
    }

    async fn clear(&self) -> Result<()> {
        for path in self.cache_files().await? {
            Self::remove(&path).await?;
        }
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let now = Self::now_ms();
        let mut count = 0;
        for path in self.cache_files().await? {
            if let Some(env) = Self::read_envelope(&path).await? {
                if now < env.expires_at_ms {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

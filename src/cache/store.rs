// Content-addressed image cache

use crate::error::Result;
use crate::models::request::GenerationRequest;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Separator between the digested request fields. A control character keeps
/// field boundaries unambiguous for any text that realistically reaches a
/// URL, so two different requests cannot concatenate to the same material.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Identity of a cached image: a SHA-256 digest of the request's semantic
/// fields, independent of the model or provider that produced the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// On-disk file name for this key: 64 hex chars plus the image extension.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Disk-backed store of generated images, keyed by request content.
///
/// Entries are written once and never updated or evicted. Concurrent writers
/// of the same key race benignly: they carry byte-equivalent content by
/// construction and the temp-file rename below lets the last one win without
/// readers ever observing a torn file.
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the backing directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Derive the cache key for a request.
    ///
    /// Pure function of the four request fields: equal requests map to equal
    /// keys no matter which model or provider eventually serves them.
    pub fn key_for(request: &GenerationRequest) -> CacheKey {
        let mut hasher = Sha256::new();
        hasher.update(
            format!(
                "{prompt}{sep}{negative}{sep}{width}{sep}{height}",
                prompt = request.prompt,
                negative = request.negative_prompt,
                width = request.width,
                height = request.height,
                sep = FIELD_SEPARATOR,
            )
            .as_bytes(),
        );
        CacheKey(hex::encode(hasher.finalize()))
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Fetch a cached image.
    ///
    /// Checks existence and readability only; content is never validated. A
    /// missing entry is an ordinary miss, any other IO failure propagates.
    pub async fn get(&self, key: &CacheKey) -> Result<Option<Bytes>> {
        match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => Ok(Some(Bytes::from(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist an image under its key.
    ///
    /// Writes a uniquely named temp file and renames it into place, so a
    /// concurrent writer of the same key cannot produce a partially written
    /// entry. Last write wins.
    pub async fn put(&self, key: &CacheKey, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp_path = self.dir.join(format!(
            ".{}.{}.tmp",
            key,
            uuid::Uuid::new_v4().simple()
        ));
        tokio::fs::write(&tmp_path, bytes).await?;

        if let Err(e) = tokio::fs::rename(&tmp_path, self.entry_path(key)).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Number of stored entries, for status displays and health checks.
    pub fn entry_count(&self) -> usize {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return 0;
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .map_or(false, |ext| ext == "jpg")
            })
            .count()
    }
}

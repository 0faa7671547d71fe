// Best-effort disk cache for resolved video metadata
//
// Keys are the MD5 hex of the canonical URL; values are JSON blobs with
// the resolution timestamp. The cache is advisory: every read or write
// failure is treated as a miss and never surfaces to the caller.

use std::path::PathBuf;
use std::time::Duration;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use time::OffsetDateTime;
use tracing::debug;

use super::models::VideoInfo;

const CACHE_TTL: Duration = Duration::from_secs(3600);
const CACHE_DIR_PREFIX: &str = "youtube_cache_";

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    info: VideoInfo,
    timestamp: i64,
}

/// Process-private metadata cache.
///
/// The backing directory is created fresh at startup and removed when
/// the owning service is dropped. Entries are never evicted while the
/// process runs; expiry is purely logical. Concurrent writers for the
/// same key are not coordinated, last write wins.
pub struct InfoCache {
    dir: TempDir,
    ttl: Duration,
}

impl InfoCache {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(CACHE_DIR_PREFIX).tempdir()?;
        Ok(Self {
            dir,
            ttl: CACHE_TTL,
        })
    }

    #[cfg(test)]
    fn with_ttl(ttl: Duration) -> std::io::Result<Self> {
        let mut cache = Self::new()?;
        cache.ttl = ttl;
        Ok(cache)
    }

    /// Return the cached info for a URL if a fresh entry exists.
    pub async fn lookup(&self, url: &str) -> Option<VideoInfo> {
        let bytes = tokio::fs::read(self.entry_path(url)).await.ok()?;
        let entry: CacheEntry = serde_json::from_slice(&bytes).ok()?;

        let age = OffsetDateTime::now_utc().unix_timestamp() - entry.timestamp;
        if age < self.ttl.as_secs() as i64 {
            Some(entry.info)
        } else {
            None
        }
    }

    /// Persist info for a URL. Failures are logged and swallowed.
    pub async fn store(&self, url: &str, info: &VideoInfo) {
        let entry = CacheEntry {
            info: info.clone(),
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        };

        let bytes = match serde_json::to_vec(&entry) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("could not serialize cache entry: {}", err);
                return;
            }
        };

        if let Err(err) = tokio::fs::write(self.entry_path(url), bytes).await {
            debug!("could not write cache entry: {}", err);
        }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.path().join(format!("{}.json", cache_key(url)))
    }
}

/// MD5 hex digest of the URL. Collisions are not handled; the cache is
/// not load-bearing for correctness.
pub fn cache_key(url: &str) -> String {
    hex::encode(Md5::digest(url.as_bytes()))
}

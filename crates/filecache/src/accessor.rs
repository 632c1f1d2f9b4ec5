//! Per-file view of the cache

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use bytes::Bytes;
use memlru::Cache;
use tracing::debug;

use crate::error::{Error, Result};
use crate::item::FileCacheItem;

/// Appended to the cache key of compressed copies
pub const COMPRESSION_SUFFIX: &str = "compressed";

/// Cache handle shared between accessors and threads
pub type SharedCache = Arc<dyn Cache<FileCacheItem> + Send + Sync>;

/// Cache key for `path`.
///
/// The full path is used, not just the file name, so files with the same
/// name in different directories never collide. Paths that are not valid
/// UTF-8 have no key: a lossy conversion would map distinct paths onto the
/// same string.
pub fn cache_key(path: &Path, compression: bool) -> Option<String> {
    let mut key = path.to_str()?.to_owned();
    if compression {
        key.push_str(COMPRESSION_SUFFIX);
    }
    Some(key)
}

/// Reads and writes the cached copy of a single file.
///
/// Built from the file's current modification time; a cached copy stamped
/// with any other time is treated as stale. Without a cache, or for a path
/// with no [`cache_key`], every operation is a no-op.
pub struct FileCacheAccessor {
    path: PathBuf,
    key: Option<String>,
    modified: SystemTime,
    cache: Option<SharedCache>,
}

impl FileCacheAccessor {
    /// Accessor for `path`, last modified at `modified`
    pub fn new(
        path: impl Into<PathBuf>,
        modified: SystemTime,
        compression: bool,
        cache: Option<SharedCache>,
    ) -> Self {
        let path = path.into();
        let key = cache_key(&path, compression);
        Self {
            path,
            key,
            modified,
            cache,
        }
    }

    /// Accessor for `path`, taking the modification time from the filesystem
    pub fn for_file(
        path: impl Into<PathBuf>,
        compression: bool,
        cache: Option<SharedCache>,
    ) -> Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(Error::NotAFile(path));
        }
        let modified = metadata.modified()?;
        Ok(Self::new(path, modified, compression, cache))
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key the file is cached under, if it can be cached at all
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn cached(&self) -> Option<(&str, &SharedCache)> {
        Some((self.key.as_deref()?, self.cache.as_ref()?))
    }

    /// Modification time this accessor considers current
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Cached contents, if present and not stale.
    ///
    /// A stale copy is removed from the cache.
    pub fn get_file(&self) -> Option<Bytes> {
        let (key, cache) = self.cached()?;
        let item = cache.get(key)?;

        if item.modified != self.modified {
            debug!(key = %key, "removing stale file from cache");
            cache.remove(key);
            return None;
        }

        Some(item.data.clone())
    }

    /// Cache `data` as the contents of the file at time `modified`.
    ///
    /// Returns whether the data was stored. Files too large for the cache
    /// are simply not cached.
    pub fn put_file(&self, data: Bytes, modified: SystemTime) -> bool {
        let Some((key, cache)) = self.cached() else {
            return false;
        };

        match cache.add(key, Arc::new(FileCacheItem::new(data, modified))) {
            Ok(()) => true,
            Err(err) => {
                debug!(key = %key, error = %err, "file not cached");
                false
            }
        }
    }
}

//! Read-through file access

use std::fs;
use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::trace;

use crate::accessor::{FileCacheAccessor, SharedCache};
use crate::error::Result;

/// Serves file contents from the cache, falling back to disk on a miss
#[derive(Clone)]
pub struct CachedFileReader {
    cache: Option<SharedCache>,
    compression: bool,
}

impl CachedFileReader {
    /// Create a reader. With `compression` set, contents are gzip-encoded
    /// before being cached and returned.
    pub fn new(cache: Option<SharedCache>, compression: bool) -> Self {
        Self { cache, compression }
    }

    /// Whether returned contents are gzip-encoded
    pub fn compression(&self) -> bool {
        self.compression
    }

    /// Contents of the file at `path`.
    ///
    /// A fresh cached copy is returned as is. Otherwise the file is read
    /// (and compressed if configured), cached under the modification time
    /// observed before reading, and returned.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Bytes> {
        let path = path.as_ref();
        let accessor = FileCacheAccessor::for_file(path, self.compression, self.cache.clone())?;

        if let Some(data) = accessor.get_file() {
            trace!(path = %path.display(), "file served from cache");
            return Ok(data);
        }

        let raw = fs::read(path)?;
        let data = if self.compression {
            gzip(&raw)?
        } else {
            Bytes::from(raw)
        };

        accessor.put_file(data.clone(), accessor.modified());
        Ok(data)
    }
}

fn gzip(raw: &[u8]) -> std::io::Result<Bytes> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(raw.len() / 2), Compression::default());
    encoder.write_all(raw)?;
    Ok(Bytes::from(encoder.finish()?))
}

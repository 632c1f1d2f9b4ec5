//! Cached file contents

use std::time::SystemTime;

use bytes::Bytes;
use memlru::CacheItem;

/// Contents of one file, possibly compressed, plus the modification time
/// they were read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCacheItem {
    /// File bytes as they will be served
    pub data: Bytes,

    /// Modification time of the file when `data` was read
    pub modified: SystemTime,
}

impl FileCacheItem {
    /// Wrap `data` read from a file last modified at `modified`
    pub fn new(data: Bytes, modified: SystemTime) -> Self {
        Self { data, modified }
    }
}

impl CacheItem for FileCacheItem {
    fn size(&self) -> usize {
        self.data.len()
    }
}

//! # filecache
//!
//! Keeps file contents in a [`memlru`] cache so repeated reads skip the disk.
//!
//! Entries carry the file's modification time; a cached copy whose timestamp
//! no longer matches the file on disk is dropped on the next read. Plain and
//! gzip-compressed copies of the same file are cached under separate keys.

#![warn(missing_docs)]

mod accessor;
mod error;
mod item;
mod reader;

pub use accessor::{cache_key, FileCacheAccessor, SharedCache, COMPRESSION_SUFFIX};
pub use error::{Error, Result};
pub use item::FileCacheItem;
pub use reader::CachedFileReader;

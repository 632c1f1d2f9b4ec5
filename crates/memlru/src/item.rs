//! Sized payloads

use std::sync::Arc;

use bytes::Bytes;

/// A value that can be stored in an [`LruCache`](crate::LruCache).
///
/// The cache reads `size()` once, when the item is admitted, and charges that
/// many units against its capacity until the entry leaves the cache. The
/// result must therefore be deterministic for as long as the item is cached.
/// Bytes are the usual unit, but any consistent unit works.
pub trait CacheItem {
    /// Size of this item in capacity units
    fn size(&self) -> usize;
}

impl CacheItem for [u8] {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheItem for str {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheItem for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheItem for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheItem for Bytes {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: CacheItem + ?Sized> CacheItem for &T {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: CacheItem + ?Sized> CacheItem for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: CacheItem + ?Sized> CacheItem for Arc<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

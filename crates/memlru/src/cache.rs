//! LruCache: thread-safe facade over the LRU engine

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::item::CacheItem;
use crate::lru::{check_fits, Removed, SizedLru};
use crate::stats::CacheStats;

/// The add/get/remove contract shared by cache implementations.
///
/// Layers built on top of a cache (such as a file content cache) are written
/// against this trait rather than a concrete type.
pub trait Cache<V: ?Sized> {
    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// Fails with [`Error::ItemTooLarge`](crate::Error::ItemTooLarge) and
    /// changes nothing if the value can never fit.
    fn add(&self, key: &str, value: Arc<V>) -> Result<()>;

    /// Fetch the value under `key`, marking it most recently used
    fn get(&self, key: &str) -> Option<Arc<V>>;

    /// Drop the entry under `key`, if any
    fn remove(&self, key: &str);
}

/// Size-bounded LRU cache.
///
/// Capacity is a budget in the units reported by [`CacheItem::size`], fixed
/// at construction. Adding an item that would overflow it evicts the least
/// recently used entries until the item fits.
///
/// Every operation takes one internal lock for its whole duration, so calls
/// from many threads behave as if they ran one after another. Values are
/// stored behind [`Arc`]; `get` hands out a new reference and entries that
/// leave the cache are released only after the lock is dropped.
///
/// ```
/// use memlru::LruCache;
///
/// let cache: LruCache<Vec<u8>> = LruCache::new(100);
/// cache.add("a", vec![0u8; 60]).unwrap();
/// cache.add("b", vec![0u8; 60]).unwrap(); // evicts "a"
///
/// assert!(cache.get("a").is_none());
/// assert_eq!(cache.get("b").map(|v| v.len()), Some(60));
/// ```
pub struct LruCache<V: ?Sized> {
    inner: Mutex<SizedLru<Arc<V>>>,

    /// Fixed at construction, so readable without the lock
    capacity: usize,

    stats: CacheStats,
}

impl<V: ?Sized> LruCache<V> {
    /// Create an empty cache holding at most `capacity` units.
    ///
    /// A capacity of zero is accepted; such a cache rejects every add.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(SizedLru::new(capacity)),
            capacity,
            stats: CacheStats::new(),
        }
    }

    /// Fetch the value under `key` and mark it most recently used
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let value = self.inner.lock().get(key).cloned();
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Fetch the value under `key` without touching recency order or stats
    pub fn peek(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().peek(key).cloned()
    }

    /// Remove the entry under `key`, returning its value.
    ///
    /// Removing an absent key does nothing.
    pub fn remove(&self, key: &str) -> Option<Arc<V>> {
        let removed = self.inner.lock().remove(key);
        removed.map(|entry| entry.value)
    }

    /// Whether `key` is cached. Does not change recency order.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Units currently charged against the capacity
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the cached keys, most recently used first
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop every entry and reset the statistics
    pub fn clear(&self) {
        let drained = self.inner.lock().clear();
        debug!(entries = drained.len(), "cleared cache");
        self.stats.reset();
    }
}

impl<V: CacheItem + ?Sized> LruCache<V> {
    /// Store `value` under `key`, evicting least recently used entries as
    /// needed.
    ///
    /// The item's size is read once, here, and charged until the entry
    /// leaves the cache. An existing entry under `key` is replaced. If the
    /// item is larger than the whole capacity the call fails with
    /// [`Error::ItemTooLarge`](crate::Error::ItemTooLarge) and the cache,
    /// including any existing entry under `key`, is unchanged.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Arc<V>>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        let size = value.size();

        if let Err(err) = check_fits(size, self.capacity) {
            debug!(key = %key, size, capacity = self.capacity, "rejected oversized item");
            self.stats.record_rejection();
            return Err(err);
        }

        let admission = self.inner.lock().insert(key, value, size)?;

        self.stats.record_insert();
        self.stats.record_evictions(admission.evicted.len());
        if let Some(replaced) = &admission.replaced {
            trace!(key = %replaced.key, size = replaced.size, "replaced entry");
        }
        for Removed { key, size, .. } in &admission.evicted {
            trace!(key = %key, size, "evicted entry");
        }

        Ok(())
    }
}

impl<V: CacheItem + ?Sized> Cache<V> for LruCache<V> {
    fn add(&self, key: &str, value: Arc<V>) -> Result<()> {
        LruCache::add(self, key, value)
    }

    fn get(&self, key: &str) -> Option<Arc<V>> {
        LruCache::get(self, key)
    }

    fn remove(&self, key: &str) {
        LruCache::remove(self, key);
    }
}

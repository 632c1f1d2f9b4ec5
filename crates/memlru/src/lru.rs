//! Size-bounded LRU engine
//!
//! Keeps the key index, the recency list and the size counter in step. Not
//! synchronized; [`LruCache`](crate::LruCache) wraps it in a mutex.

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{Error, Result};
use crate::list::{Entry, RecencyList};

/// An entry that left the cache, handed back so it is dropped by the caller
pub(crate) struct Removed<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) size: usize,
}

impl<V> From<Entry<V>> for Removed<V> {
    fn from(entry: Entry<V>) -> Self {
        Self {
            key: entry.key,
            value: entry.value,
            size: entry.size,
        }
    }
}

/// Everything displaced by a successful admission
pub(crate) struct Admission<V> {
    pub(crate) replaced: Option<Removed<V>>,
    pub(crate) evicted: Vec<Removed<V>>,
}

/// Reject items that could never fit, whatever is evicted
pub(crate) fn check_fits(size: usize, capacity: usize) -> Result<()> {
    if capacity == 0 || size > capacity {
        return Err(Error::ItemTooLarge { size, capacity });
    }
    Ok(())
}

#[cfg_attr(test, derive(Clone))]
pub(crate) struct SizedLru<V> {
    index: HashMap<String, usize, RandomState>,
    list: RecencyList<V>,
    capacity: usize,
    current_size: usize,
}

impl<V> SizedLru<V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_hasher(RandomState::new()),
            list: RecencyList::new(),
            capacity,
            current_size: 0,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.current_size
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    /// Admit `value` under `key`, charging `size` against the capacity.
    ///
    /// Validation happens before any mutation: on `ItemTooLarge` the cache,
    /// including a previous entry under `key`, is left exactly as it was.
    pub(crate) fn insert(&mut self, key: String, value: V, size: usize) -> Result<Admission<V>> {
        check_fits(size, self.capacity)?;

        let replaced = self.remove(&key);
        let evicted = self.evict_for(size);

        let slot = self.list.insert(Entry::new(key.clone(), value, size));
        self.index.insert(key, slot);
        self.current_size += size;

        Ok(Admission { replaced, evicted })
    }

    /// Look up `key` and mark it most recently used
    pub(crate) fn get(&mut self, key: &str) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.list.touch(slot);
        self.list.get(slot).map(|entry| &entry.value)
    }

    /// Look up `key` without changing recency order
    pub(crate) fn peek(&self, key: &str) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.list.get(slot).map(|entry| &entry.value)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Removed<V>> {
        let slot = self.index.remove(key)?;
        let entry = self.list.take(slot)?;
        self.current_size -= entry.size;
        Some(entry.into())
    }

    /// Evict from the tail until `incoming` more units fit
    fn evict_for(&mut self, incoming: usize) -> Vec<Removed<V>> {
        let mut evicted = Vec::new();

        // current_size <= capacity, so the subtraction cannot underflow
        while incoming > self.capacity - self.current_size {
            let Some(slot) = self.list.tail() else {
                break;
            };
            let Some(entry) = self.list.take(slot) else {
                break;
            };
            self.index.remove(&entry.key);
            self.current_size -= entry.size;
            evicted.push(entry.into());
        }

        evicted
    }

    /// Keys from most to least recently used
    pub(crate) fn keys(&self) -> Vec<String> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }

    pub(crate) fn clear(&mut self) -> Vec<Removed<V>> {
        self.index.clear();
        self.current_size = 0;
        self.list.clear().into_iter().map(Removed::from).collect()
    }

    /// Verify every structural invariant, returning the first violation found
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        let order = self.list.check_links()?;

        if order.len() != self.index.len() {
            return Err(format!(
                "{} entries linked, {} indexed",
                order.len(),
                self.index.len()
            ));
        }

        let mut total: usize = 0;
        for slot in order {
            let entry = self.list.get(slot).ok_or_else(|| format!("empty slot {slot}"))?;
            match self.index.get(&entry.key) {
                Some(&indexed) if indexed == slot => {}
                other => {
                    return Err(format!(
                        "key {:?} at slot {slot} indexed as {other:?}",
                        entry.key
                    ))
                }
            }
            total = total
                .checked_add(entry.size)
                .ok_or_else(|| format!("sizes overflow at key {:?}", entry.key))?;
        }

        if total != self.current_size {
            return Err(format!(
                "sizes sum to {total}, counter says {}",
                self.current_size
            ));
        }
        if self.current_size > self.capacity {
            return Err(format!(
                "size {} over capacity {}",
                self.current_size, self.capacity
            ));
        }
        Ok(())
    }
}

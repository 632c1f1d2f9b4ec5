//! # memlru
//!
//! Size-bounded in-memory LRU cache.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1))
//! - **Recency list**: index-based doubly-linked list, head = most recently used (O(1))
//! - **Eviction**: drop from the tail until the incoming item fits the byte budget
//! - **Facade**: [`LruCache`] serializes every call behind one mutex
//!
//! Capacity counts whatever [`CacheItem::size`] reports, usually bytes, not
//! entries.

#![warn(missing_docs)]

mod cache;
mod error;
mod item;
mod list;
mod lru;
mod stats;

pub use cache::{Cache, LruCache};
pub use error::{Error, Result};
pub use item::CacheItem;
pub use stats::CacheStats;

//! Error types for memlru

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Item can never fit, even in an empty cache
    #[error("Item too large: {size} bytes (capacity {capacity} bytes)")]
    ItemTooLarge {
        /// Size reported by the rejected item
        size: usize,
        /// Fixed capacity of the cache
        capacity: usize,
    },
}

//! Error types for filecache

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for file cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for file cache operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Path exists but is not a regular file
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
}

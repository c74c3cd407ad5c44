//! Error types for templatemaker.

use std::path::PathBuf;

/// Errors that can occur while training or applying a template.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text does not conform to the learned template.
    #[error("text does not match the learned template")]
    NoMatch,

    /// The template has not learned any sample yet.
    #[error("template has no skeleton yet (learn at least one sample first)")]
    Untrained,

    /// A sanitizer denylist produced an invalid pattern.
    #[error("invalid sanitizer pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading a sample from disk failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for templatemaker operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for markup reading and writing.

use thiserror::Error;

/// Errors that can occur when reading or writing property markup.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The text could not be parsed as XML.
    #[error("malformed markup: {0}")]
    Malformed(String),

    /// The document contained no root element.
    #[error("no root element found in markup")]
    NoRoot,

    /// Element nesting exceeded the configured bound.
    #[error("markup nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, Error>;

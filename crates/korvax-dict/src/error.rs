//! Error types for dictionary conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when converting between markup and dictionaries.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be parsed into a markup node tree.
    #[error("malformed markup: {0}")]
    MalformedMarkup(#[from] korvax_mxml::Error),

    /// A file-path input does not exist.
    #[error("input file not found: {path}")]
    MissingInput { path: PathBuf },

    /// A write or flatten was requested on a dictionary with no data slots.
    #[error("dictionary is empty")]
    EmptyDict,

    /// Nesting exceeded the configured bound.
    #[error("nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    /// A node carried an attribute combination outside the dialect vocabulary.
    #[error("unrecognized attribute combination: {found}")]
    UnknownAttributes { found: String },

    /// `append` without a key on a dictionary that is not an ordered list.
    #[error("append on a non-list dictionary requires a key")]
    MissingKey,

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, Error>;

// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Export failed for {path}: {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures reported by a [`crate::store::KeyValueStore`].
///
/// The document repository never surfaces these to its caller; they are
/// logged and the operation degrades to "empty" or "not persisted".
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store quota exceeded ({requested} bytes requested, limit {limit})")]
    QuotaExceeded { limit: usize, requested: usize },

    #[error("Store file {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("Store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

//! Error types for Mangashelf Core

use crate::types::MangaStatus;
use thiserror::Error;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Top-level error type for all Mangashelf operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that occur while building filter configuration
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Status filter has no entry for {0}")]
    MissingStatus(MangaStatus),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid tri-state value: {0} (expected true, false or unset)")]
    InvalidTriState(String),

    #[error("Invalid tracker binding: {0}")]
    InvalidTracker(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt library data: {0}")]
    Corrupt(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

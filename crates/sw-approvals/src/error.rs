// error.rs — Error types for the approval store subsystem.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during approval store operations.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A persisted record exists but cannot be decoded.
    ///
    /// Callers that only care about presence fold this into "not found"
    /// so one damaged file never takes down the rest of the store.
    #[error("corrupt approval record at {path}: {source}")]
    CorruptRecord {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize a record for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested approval record was not found.
    #[error("approval record not found: {0}")]
    NotFound(Uuid),

    /// Invalid status transition.
    #[error("invalid transition from {from} to {to} for approval {id}")]
    InvalidTransition { id: Uuid, from: String, to: String },
}

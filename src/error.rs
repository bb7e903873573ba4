//! Error Taxonomy
//!
//! Caller-facing errors (`ServiceError`) are surfaced synchronously to the request
//! that caused them. Storage errors (`StorageError`) are raised by the persisted
//! store and ledger; the lifecycle layer absorbs them and degrades to "empty history".

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a password is rejected before any identifier is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password invalid")]
    Empty,
    #[error("Password must be {max} or less characters in length (got {actual})")]
    TooLong { max: usize, actual: usize },
    #[error("Password invalid: quote characters are not allowed")]
    ContainsQuote,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] PasswordError),

    #[error("Cannot GET id from URL, id not valid: {0:?}")]
    InvalidIdentifier(String),

    #[error("Cannot find hash for ID: {0}")]
    NotFound(u64),

    /// Stats requested before a single record exists.
    #[error("No records have been created yet")]
    NoRecordsYet,

    #[error("Server is shutting down")]
    ShuttingDown,

    #[error("Shutdown has already been requested")]
    AlreadyShutdown,

    /// The shutdown task panicked or was torn down with the runtime.
    #[error("Shutdown sequence failed: {0}")]
    ShutdownFailed(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed content in {path}: {line:?}")]
    Malformed { path: PathBuf, line: String },
}

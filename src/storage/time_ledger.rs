use crate::error::StorageError;

use std::path::{Path, PathBuf};

/// Cumulative microseconds spent computing digests, across all earlier sessions.
#[derive(Debug, Clone)]
pub struct TimeLedger {
    path: PathBuf,
}

impl TimeLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the last non-empty line of the ledger as an integer.
    pub async fn load(&self) -> Result<u64, StorageError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StorageError::Unavailable {
                path: self.path.clone(),
                source,
            })?;

        let last = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .unwrap_or("");

        last.parse().map_err(|_| StorageError::Malformed {
            path: self.path.clone(),
            line: last.to_string(),
        })
    }

    /// Replaces the ledger content with `total_micros`.
    pub async fn store(&self, total_micros: u64) -> Result<(), StorageError> {
        tokio::fs::write(&self.path, total_micros.to_string())
            .await
            .map_err(|source| StorageError::WriteFailure {
                path: self.path.clone(),
                source,
            })
    }
}

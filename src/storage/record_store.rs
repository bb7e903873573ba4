use crate::error::StorageError;

use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Append-only log mapping record identifiers to digests.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counts the lines in the log. Each line is one record from an earlier session.
    pub async fn count_records(&self) -> Result<u64, StorageError> {
        let mut lines = self.open_lines().await?;
        let mut count = 0u64;

        while lines
            .next_line()
            .await
            .map_err(|e| self.unavailable(e))?
            .is_some()
        {
            count += 1;
        }

        Ok(count)
    }

    /// Returns the digest of the first line whose key satisfies `predicate`.
    ///
    /// O(n) in the size of the log. No sort order is assumed, so the whole file may be
    /// read. Lines whose key is not an integer are skipped.
    pub async fn scan<F>(&self, predicate: F) -> Result<Option<(u64, String)>, StorageError>
    where
        F: Fn(u64) -> bool,
    {
        let mut lines = self.open_lines().await?;

        while let Some(line) = lines.next_line().await.map_err(|e| self.unavailable(e))? {
            let Some((key, digest)) = parse_line(&line) else {
                tracing::trace!("Skipping unparsable record line: {:?}", line);
                continue;
            };

            if predicate(key) {
                return Ok(Some((key, digest.to_string())));
            }
        }

        Ok(None)
    }

    /// Looks up the digest persisted for `id`. First match wins.
    pub async fn find(&self, id: u64) -> Result<Option<String>, StorageError> {
        Ok(self.scan(|key| key == id).await?.map(|(_, digest)| digest))
    }

    /// Appends every pair as its own line, creating the file if needed.
    ///
    /// Lines already written stay written if a later write fails.
    pub async fn append_all(&self, entries: &[(u64, String)]) -> Result<(), StorageError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.write_failure(e))?;

        let mut writer = BufWriter::new(file);
        for (id, digest) in entries {
            let line = format!("{} {}\n", id, digest);
            writer
                .write_all(line.as_bytes())
                .await
                .map_err(|e| self.write_failure(e))?;
        }
        writer.flush().await.map_err(|e| self.write_failure(e))?;

        Ok(())
    }

    async fn open_lines(&self) -> Result<tokio::io::Lines<BufReader<File>>, StorageError> {
        let file = File::open(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;
        Ok(BufReader::new(file).lines())
    }

    fn unavailable(&self, source: std::io::Error) -> StorageError {
        StorageError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }

    fn write_failure(&self, source: std::io::Error) -> StorageError {
        StorageError::WriteFailure {
            path: self.path.clone(),
            source,
        }
    }
}

/// Splits `"<id> <digest>"`. A line holding only a key yields an empty digest.
fn parse_line(line: &str) -> Option<(u64, &str)> {
    let (key, digest) = line.split_once(' ').unwrap_or((line, ""));
    let key = key.parse().ok()?;
    Some((key, digest))
}

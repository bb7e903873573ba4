use crate::error::ServiceError;

use serde::{Deserialize, Serialize};

/// Identifier of a record. Always strictly positive.
pub type RecordId = u64;

/// A job as seen by callers.
///
/// `digest` is empty while `pending` is true. Once a digest is published the record
/// never reverts to pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub digest: String,
    pub pending: bool,
}

impl Record {
    pub fn pending(id: RecordId) -> Self {
        Self {
            id,
            digest: String::new(),
            pending: true,
        }
    }

    pub fn ready(id: RecordId, digest: String) -> Self {
        Self {
            id,
            digest,
            pending: false,
        }
    }
}

/// State recovered from disk at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct History {
    /// Lines in the record store, i.e. records created by earlier sessions.
    pub saved_records: u64,
    /// Microseconds recorded in the time ledger.
    pub persisted_micros: u64,
}

/// Aggregate throughput across every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    /// Average microseconds per record, truncated.
    pub average: u64,
}

/// Parses an identifier coming from the transport.
///
/// Zero, negative and non-numeric input are all `InvalidIdentifier`.
pub fn parse_record_id(raw: &str) -> Result<RecordId, ServiceError> {
    match raw.trim().parse::<RecordId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::InvalidIdentifier(raw.to_string())),
    }
}

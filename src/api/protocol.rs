//! Wire Protocol
//!
//! JSON field names are capitalized to stay compatible with existing clients.

use crate::jobs::types::{Record, RecordId, Stats};

use serde::{Deserialize, Serialize};

pub const ENDPOINT_HASH: &str = "/hash";
pub const ENDPOINT_HASH_BY_ID: &str = "/hash/:id";
pub const ENDPOINT_STATS: &str = "/stats";
pub const ENDPOINT_SHUTDOWN: &str = "/shutdown";

pub const SHUTDOWN_MESSAGE: &str = "Shutting down server";

/// Form body (or query string) of `POST /hash`. A missing field is treated as an empty password.
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    #[serde(rename = "Id")]
    pub id: RecordId,
    /// Empty while the digest is still being computed.
    #[serde(rename = "Hash")]
    pub hash: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            hash: record.digest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "Total")]
    pub total: u64,
    #[serde(rename = "Average")]
    pub average: u64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total: stats.total,
            average: stats.average,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

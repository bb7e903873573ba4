//! Asynchronous Password Hashing Service Library
//!
//! Accepts passwords, hands back an identifier immediately and computes a SHA-256/Base64
//! digest in the background after a fixed delay. Throughput statistics survive restarts
//! through two plain text files.
//!
//! ## Architecture Modules
//! - **`digest`**: Password validation and the digest function.
//! - **`storage`**: The append-only record store and the cumulative time ledger.
//! - **`jobs`**: The job table, identifier allocation, deferred computation, lookups and
//!   statistics. Every piece of mutable session state lives here.
//! - **`lifecycle`**: Startup recovery and the `Running -> Draining -> Persisting -> Stopped`
//!   shutdown sequence.
//! - **`api`**: The axum HTTP adapter.
//! - **`config`** / **`error`**: Service configuration and the error taxonomy.

pub mod api;
pub mod config;
pub mod digest;
pub mod error;
pub mod jobs;
pub mod lifecycle;
pub mod storage;

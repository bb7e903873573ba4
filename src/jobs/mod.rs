//! Job Lifecycle Module
//!
//! Owns every piece of mutable session state: the in-memory job table, the identifier
//! allocator, the session time accumulator and the in-flight job counter.
//!
//! ## Lifecycle of a Job
//! 1. **Submission**: The password is validated, an identifier is allocated from a single
//!    monotonic counter and a pending entry (empty digest) is inserted before `submit`
//!    returns.
//! 2. **Deferred Work**: A detached task waits for the configured delay, computes the
//!    digest, publishes it into the table and adds its elapsed time to the session total.
//! 3. **Lookup**: Reads the job table first, then falls back to the persisted record store.
//! 4. **Drain**: At shutdown the table is snapshotted and handed to the persistence flush.
//!
//! ## Submodules
//! - **`types`**: Records, identifiers, persisted history and statistics.
//! - **`table`**: Concurrent id -> digest map with atomic allocation.
//! - **`scheduler`**: Submission, deferred computation, lookup and drain coordination.
//! - **`stats`**: Total/average aggregation across session and persisted history.

pub mod scheduler;
pub mod stats;
pub mod table;
pub mod types;

//! Persistence Module
//!
//! File-backed state that survives process restarts.
//!
//! ## Core Concepts
//! - **Record Store**: An append-only text log, one `"<id> <digest>"` pair per line. No
//!   header, no escaping, no deduplication. The number of lines is the number of records
//!   saved by earlier sessions.
//! - **Time Ledger**: A single integer (cumulative processing microseconds across every
//!   earlier session), fully overwritten on each flush.
//!
//! Both are deliberately dumb. Recovery policy (treating a missing file as empty history)
//! lives in `lifecycle`, not here; these types only report what went wrong.

pub mod record_store;
pub mod time_ledger;

pub use record_store::RecordStore;
pub use time_ledger::TimeLedger;

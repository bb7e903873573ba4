//! Session Lifecycle Module
//!
//! Bridges the in-memory session and the persisted history.
//!
//! ## Phases
//! - **Startup**: `load_state` recovers the saved record count and the time ledger. Missing
//!   or malformed files mean "no prior history" and are logged, never fatal.
//! - **Shutdown**: `Lifecycle::shutdown` walks `Running -> Draining -> Persisting -> Stopped`.
//!   Draining waits for in-flight jobs up to the grace period; persisting runs `flush` once.
//!
//! ## Submodules
//! - **`persistence`**: `load_state` and `flush`.
//! - **`shutdown`**: The shutdown state machine.

pub mod persistence;
pub mod shutdown;

pub use persistence::{FlushReport, flush, load_state};
pub use shutdown::{Lifecycle, ShutdownState};

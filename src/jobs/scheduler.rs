//! Job Scheduler
//!
//! The single coordinator for session state. Callers never touch the job table or the
//! counters directly; they go through `submit`, `lookup` and `stats`.
//!
//! ## Responsibilities
//! - **Allocation**: Ids continue from the persisted record count and never repeat.
//! - **Deferred Work**: One detached tokio task per job, "sleep, hash, publish".
//! - **Two-tier Lookup**: Job table first, persisted record store second.
//! - **Drain Support**: Tracks in-flight jobs so shutdown can wait for them, bounded by a timeout.

use super::stats::aggregate;
use super::table::JobTable;
use super::types::*;
use crate::digest::{digest, validate_password};
use crate::error::ServiceError;
use crate::storage::RecordStore;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// The timed part of a job: turns a password into the digest that gets published.
///
/// Type-erased so the default synchronous digest and slower asynchronous hashers can be
/// stored behind the same field.
pub type HashFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = String> + Send>> + Send + Sync>;

/// Wraps the plain digest function as a `HashFn`.
pub fn default_hasher() -> HashFn {
    Arc::new(|password: String| {
        Box::pin(async move { digest(&password) }) as Pin<Box<dyn Future<Output = String> + Send>>
    })
}

pub struct JobScheduler {
    table: JobTable,
    /// Fallback tier for lookups of ids created by earlier sessions.
    store: RecordStore,
    history: History,
    /// Microseconds spent in this session's completed jobs.
    session_micros: AtomicU64,
    job_delay: Duration,
    hasher: HashFn,
    in_flight: AtomicUsize,
    idle: Notify,
    accepting: AtomicBool,
}

impl JobScheduler {
    pub fn new(store: RecordStore, history: History, job_delay: Duration) -> Arc<Self> {
        Self::with_hasher(store, history, job_delay, default_hasher())
    }

    /// Like `new`, with a custom hashing step. Its running time is what the job
    /// contributes to the session's processing time.
    pub fn with_hasher(
        store: RecordStore,
        history: History,
        job_delay: Duration,
        hasher: HashFn,
    ) -> Arc<Self> {
        Arc::new(Self {
            table: JobTable::new(history.saved_records),
            store,
            history,
            session_micros: AtomicU64::new(0),
            job_delay,
            hasher,
            in_flight: AtomicUsize::new(0),
            idle: Notify::new(),
            accepting: AtomicBool::new(true),
        })
    }

    /// Accepts a password, returning its identifier before any digest work starts.
    ///
    /// The pending entry is visible to `lookup` by the time this returns. The digest is
    /// computed by a detached task that outlives the calling request.
    pub fn submit(self: &Arc<Self>, password: &str) -> Result<RecordId, ServiceError> {
        validate_password(password)?;

        // Count the job before checking the gate so a concurrent drain always sees it.
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        if !self.accepting.load(Ordering::SeqCst) {
            self.finish_job();
            return Err(ServiceError::ShuttingDown);
        }

        let id = self.table.insert_pending();
        tracing::info!("Accepted job {}", id);

        let scheduler = Arc::clone(self);
        let password = password.to_string();
        tokio::spawn(async move {
            scheduler.run_job(id, password).await;
        });

        Ok(id)
    }

    async fn run_job(&self, id: RecordId, password: String) {
        tokio::time::sleep(self.job_delay).await;
        let started = Instant::now();

        let encoded = (self.hasher)(password).await;
        self.table.complete(id, encoded);

        let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.session_micros.fetch_add(elapsed, Ordering::SeqCst);
        tracing::debug!("Job {} completed in {}us", id, elapsed);

        self.finish_job();
    }

    fn finish_job(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }

    /// Finds a record in the job table, then in the persisted store.
    ///
    /// A pending job comes back as a pending `Record` with an empty digest. Persisted
    /// lines with an empty digest were flushed while still pending and never completed;
    /// they are reported as `NotFound`.
    pub async fn lookup(&self, id: RecordId) -> Result<Record, ServiceError> {
        if id == 0 {
            return Err(ServiceError::InvalidIdentifier(id.to_string()));
        }

        if let Some(stored) = self.table.get(id) {
            return Ok(if stored.is_empty() {
                Record::pending(id)
            } else {
                Record::ready(id, stored)
            });
        }

        match self.store.find(id).await {
            Ok(Some(stored)) if !stored.is_empty() => Ok(Record::ready(id, stored)),
            Ok(_) => Err(ServiceError::NotFound(id)),
            Err(e) => {
                tracing::warn!("Record store lookup for {} failed: {}", id, e);
                Err(ServiceError::NotFound(id))
            }
        }
    }

    pub fn stats(&self) -> Result<Stats, ServiceError> {
        aggregate(
            self.job_count() as u64,
            self.history.saved_records,
            self.session_micros(),
            self.history.persisted_micros,
        )
    }

    /// Rejects further submissions. Jobs already accepted keep running.
    pub fn stop_accepting(&self) {
        self.accepting.store(false, Ordering::SeqCst);
    }

    /// Waits until no job is in flight, or until `timeout` elapses.
    ///
    /// Returns `true` if the scheduler went idle in time.
    pub async fn wait_for_idle(&self, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.idle.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();

                if self.in_flight.load(Ordering::SeqCst) == 0 {
                    return;
                }
                notified.await;
            }
        };

        tokio::time::timeout(timeout, wait).await.is_ok()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn pending_count(&self) -> usize {
        self.table.pending_count()
    }

    /// Copy of the job table for the shutdown flush.
    pub fn drain(&self) -> Vec<(RecordId, String)> {
        self.table.snapshot()
    }

    pub fn session_micros(&self) -> u64 {
        self.session_micros.load(Ordering::SeqCst)
    }

    pub fn history(&self) -> History {
        self.history
    }

    pub fn job_count(&self) -> usize {
        self.table.len()
    }
}

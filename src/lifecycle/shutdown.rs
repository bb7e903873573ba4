use super::persistence::{FlushReport, flush};
use crate::error::ServiceError;
use crate::jobs::scheduler::JobScheduler;
use crate::storage::{RecordStore, TimeLedger};

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Where the process is in its shutdown sequence. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShutdownState {
    /// Accepting submissions and lookups.
    Running,
    /// Submissions rejected; waiting up to the grace period for in-flight jobs.
    Draining,
    /// Writing the job table and ledger.
    Persisting,
    /// Terminal. Nothing is served any more.
    Stopped,
}

pub struct Lifecycle {
    scheduler: Arc<JobScheduler>,
    store: RecordStore,
    ledger: TimeLedger,
    grace_period: Duration,
    state: watch::Sender<ShutdownState>,
}

impl Lifecycle {
    pub fn new(
        scheduler: Arc<JobScheduler>,
        store: RecordStore,
        ledger: TimeLedger,
        grace_period: Duration,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(ShutdownState::Running);
        Arc::new(Self {
            scheduler,
            store,
            ledger,
            grace_period,
            state,
        })
    }

    pub fn state(&self) -> ShutdownState {
        *self.state.borrow()
    }

    /// Receiver for state changes; the server loop uses it to stop once `Stopped`.
    pub fn subscribe(&self) -> watch::Receiver<ShutdownState> {
        self.state.subscribe()
    }

    /// Resolves once the lifecycle reaches `Stopped`.
    pub async fn stopped(&self) {
        let mut receiver = self.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = receiver
            .wait_for(|state| *state == ShutdownState::Stopped)
            .await;
    }

    /// Runs the shutdown sequence. Only the first caller gets to run it.
    ///
    /// The sequence itself runs on its own task, so dropping the returned future (a
    /// client hanging up mid-drain) does not stop it from reaching `Stopped`. Jobs still
    /// running when the grace period expires are not cancelled; they are flushed as
    /// pending.
    pub async fn shutdown(self: &Arc<Self>) -> Result<FlushReport, ServiceError> {
        let started = self.state.send_if_modified(|state| {
            if *state == ShutdownState::Running {
                *state = ShutdownState::Draining;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(ServiceError::AlreadyShutdown);
        }

        let lifecycle = Arc::clone(self);
        let sequence = tokio::spawn(async move { lifecycle.drain_and_persist().await });

        sequence.await.map_err(|e| {
            tracing::error!("Shutdown sequence aborted: {}", e);
            ServiceError::ShutdownFailed(e.to_string())
        })
    }

    async fn drain_and_persist(&self) -> FlushReport {
        self.scheduler.stop_accepting();
        tracing::info!(
            "Draining {} in-flight job(s), waiting up to {:?}",
            self.scheduler.in_flight(),
            self.grace_period
        );

        if !self.scheduler.wait_for_idle(self.grace_period).await {
            tracing::warn!(
                "Grace period elapsed with {} job(s) still in flight",
                self.scheduler.in_flight()
            );
        }

        self.state.send_replace(ShutdownState::Persisting);
        let report = flush(&self.scheduler, &self.store, &self.ledger).await;

        self.state.send_replace(ShutdownState::Stopped);
        tracing::info!("Shutdown complete");

        report
    }
}

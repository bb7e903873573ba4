use crate::jobs::scheduler::JobScheduler;
use crate::jobs::types::History;
use crate::storage::{RecordStore, TimeLedger};

/// Outcome of the shutdown flush.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Lines appended to the record store.
    pub records_written: usize,
    /// Of those, entries that were still pending (written with an empty digest).
    pub pending_written: usize,
    /// Value the ledger was set to, if the write succeeded.
    pub ledger_micros: Option<u64>,
}

/// Recovers persisted history at startup.
///
/// Storage problems degrade to zero for the affected counter.
pub async fn load_state(store: &RecordStore, ledger: &TimeLedger) -> History {
    let saved_records = match store.count_records().await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("Starting with no saved records: {}", e);
            0
        }
    };

    let persisted_micros = match ledger.load().await {
        Ok(micros) => micros,
        Err(e) => {
            tracing::warn!("Starting with no recorded processing time: {}", e);
            0
        }
    };

    tracing::info!(
        "Loaded history: {} saved records, {}us total processing time",
        saved_records,
        persisted_micros
    );

    History {
        saved_records,
        persisted_micros,
    }
}

/// Appends the job table to the record store and folds session time into the ledger.
///
/// Still-pending entries are written with an empty digest so the record count read by
/// the next session stays aligned with the ids already handed out. Write failures are
/// logged and leave the affected file in whatever state the failed write produced.
pub async fn flush(
    scheduler: &JobScheduler,
    store: &RecordStore,
    ledger: &TimeLedger,
) -> FlushReport {
    let entries = scheduler.drain();
    let pending = entries.iter().filter(|(_, digest)| digest.is_empty()).count();
    let mut report = FlushReport::default();

    if pending > 0 {
        tracing::warn!("Persisting {} job(s) that never completed", pending);
    }

    if !entries.is_empty() {
        match store.append_all(&entries).await {
            Ok(()) => {
                report.records_written = entries.len();
                report.pending_written = pending;
                tracing::info!(
                    "Saved {} record(s) to {}",
                    entries.len(),
                    store.path().display()
                );
            }
            Err(e) => tracing::error!("Failed to save records: {}", e),
        }
    }

    let total = scheduler
        .history()
        .persisted_micros
        .saturating_add(scheduler.session_micros());

    match ledger.store(total).await {
        Ok(()) => {
            report.ledger_micros = Some(total);
            tracing::info!(
                "Saved total processing time {}us to {}",
                total,
                ledger.path().display()
            );
        }
        Err(e) => tracing::error!("Failed to save total processing time: {}", e),
    }

    report
}

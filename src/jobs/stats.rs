use super::types::Stats;
use crate::error::ServiceError;

/// Combines session and persisted counters into a total/average pair.
///
/// Pending jobs count toward `total` before they contribute any time, so the average
/// dips slightly while work is outstanding.
pub fn aggregate(
    session_records: u64,
    saved_records: u64,
    session_micros: u64,
    persisted_micros: u64,
) -> Result<Stats, ServiceError> {
    let total = session_records + saved_records;
    if total == 0 {
        return Err(ServiceError::NoRecordsYet);
    }

    let elapsed = persisted_micros.saturating_add(session_micros);

    Ok(Stats {
        total,
        average: elapsed / total,
    })
}

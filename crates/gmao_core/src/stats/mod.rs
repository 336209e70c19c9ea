use serde::{Deserialize, Serialize};

use crate::domain::{Incident, Status};

/// Aggregate counts derived per export, never persisted.
///
/// `closed` is tracked separately and intentionally excluded from the
/// pending/in-progress/resolved trio, so
/// `pending + in_progress + resolved <= total` with equality only when no
/// closed records exist. The resolution rate uses the full record count as
/// denominator and is 0 for an empty input set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidentStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
    pub resolution_rate: f64,
}

/// Deterministic aggregation, independent of input ordering.
pub fn compute_stats(records: &[Incident]) -> IncidentStats {
    let total = records.len() as i64;
    let mut pending = 0;
    let mut in_progress = 0;
    let mut resolved = 0;
    let mut closed = 0;

    for record in records {
        match record.status {
            Status::Pending => pending += 1,
            Status::InProgress => in_progress += 1,
            Status::Resolved => resolved += 1,
            Status::Closed => closed += 1,
        }
    }

    let resolution_rate = if total > 0 {
        resolved as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    IncidentStats {
        total,
        pending,
        in_progress,
        resolved,
        closed,
        resolution_rate,
    }
}

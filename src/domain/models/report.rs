//! Terminal report of one repair run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of one `run_full_process` invocation.
///
/// Exhaustion is an expected terminal value, not an error: `succeeded` is
/// false and the on-disk state is left for the caller to inspect.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique id for this run, carried through the logs.
    pub run_id: Uuid,
    /// Whether a build invocation satisfied the success marker.
    pub succeeded: bool,
    /// Number of cycles that actually ran.
    pub cycles_run: u32,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Wall-clock duration of the run in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

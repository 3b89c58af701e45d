//! Idle-operator selection under the longest-idle-first discipline.

use std::sync::Arc;

use crate::directory::DirectoryClient;
use crate::models::operator::{OccupancyStatus, OperatorRecord};
use crate::Result;

/// Select the longest-idle operator from a set of directory records.
///
/// Among records whose status is idle, returns the one with the
/// minimal `last_called_at`. Ties resolve to the earliest record in
/// input order, which is deterministic per call.
#[must_use]
pub fn select_longest_idle(records: &[OperatorRecord]) -> Option<&OperatorRecord> {
    records
        .iter()
        .filter(|record| record.status == OccupancyStatus::Idle)
        .min_by_key(|record| record.last_called_at)
}

/// Picks the next available operator via the directory client.
///
/// Holds no local state and performs no locking: two concurrent picks
/// can read the same idle operator before either busy-mark lands. The
/// store owns mutual exclusion; this system accepts that race.
pub struct OperatorPicker {
    directory: Arc<DirectoryClient>,
}

impl OperatorPicker {
    /// Build a picker over a shared directory client.
    #[must_use]
    pub fn new(directory: Arc<DirectoryClient>) -> Self {
        Self { directory }
    }

    /// Return the identifier of the next idle operator, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` when the directory read fails. The
    /// caller treats this as fatal: no assignment can proceed without
    /// a pick decision.
    pub async fn next_idle(&self) -> Result<Option<String>> {
        let records = self.directory.fetch_idle().await?;
        Ok(select_longest_idle(&records).map(|record| record.id.clone()))
    }
}

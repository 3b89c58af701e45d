//! Write-only audit records of calls entering routing.

use serde::Serialize;

/// Queue audit status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    /// Inbound call entered routing.
    Enqueue,
    /// Outbound call initiated by an operator.
    Calling,
}

/// Queue direction, from this system's perspective.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueueDirection {
    /// Caller-originated call.
    Inbound,
    /// Operator-originated call.
    Outbound,
}

/// One audit record appended to the external store.
///
/// Write-only from this system's perspective; no read path exists here.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QueueEntry {
    /// Conversation the record belongs to.
    pub conversation_id: String,
    /// Normalized remote number.
    pub number: String,
    /// Audit status.
    pub status: QueueStatus,
    /// Call direction.
    pub direction: QueueDirection,
}

//! Operator records as stored in the external directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Occupancy status tracked in the external directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyStatus {
    /// Available for assignment.
    Idle,
    /// Assigned to an inbound call, not yet answered.
    Ringing,
    /// Dialing out on an operator-originated call.
    Dialing,
    /// On an active call.
    OnCall,
}

/// One operator's record in the external directory.
///
/// Owned by the external store; this system reads and overwrites it but
/// never caches it across requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperatorRecord {
    /// Operator identifier (also the app endpoint user name).
    pub id: String,
    /// Current occupancy status.
    pub status: OccupancyStatus,
    /// Timestamp of the operator's last call.
    pub last_called_at: DateTime<Utc>,
    /// Conversation currently bound to the operator; empty when idle.
    #[serde(default)]
    pub conversation_id: String,
    /// Remote number currently bound to the operator; empty when idle.
    #[serde(default)]
    pub number: String,
}

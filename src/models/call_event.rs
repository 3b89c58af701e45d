//! Telephony webhook payloads.
//!
//! Each struct mirrors one callback body as the platform sends it.
//! Payloads are immutable and consumed once per callback; the
//! `conversation_uuid` is the correlation key across every stage of a
//! call's lifetime.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Direction of a call leg as reported in lifecycle events.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    /// Leg towards this application (caller side).
    Inbound,
    /// Leg originated by this application (operator side).
    Outbound,
    /// Any direction this system does not track.
    #[serde(other)]
    Other,
}

/// Lifecycle status of a call leg.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegStatus {
    /// Leg answered by the remote party.
    Answered,
    /// Leg finished.
    Completed,
    /// Any status this system does not act on.
    #[serde(other)]
    Other,
}

/// Body of the call-answer webhook (`POST /onCall`).
///
/// Exactly one of `from` (PSTN caller number) or `from_user`
/// (app-originated caller) is present on a well-formed event.
#[derive(Debug, Clone, Deserialize)]
pub struct CallAnswerEvent {
    /// Origin PSTN number; present on inbound PSTN calls.
    #[serde(default)]
    pub from: Option<String>,
    /// Originating application user; present on outbound calls.
    #[serde(default)]
    pub from_user: Option<String>,
    /// Destination number.
    #[serde(default)]
    pub to: Option<String>,
    /// Conversation identifier, stable for the call's lifetime.
    pub conversation_uuid: String,
    /// Leg identifier.
    #[serde(default)]
    pub uuid: Option<String>,
    /// Event timestamp.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Body of the call-lifecycle webhook (`POST /onEvent`).
#[derive(Debug, Clone, Deserialize)]
pub struct CallStatusEvent {
    /// Leg status.
    pub status: LegStatus,
    /// Leg direction.
    pub direction: CallDirection,
    /// Conversation identifier.
    pub conversation_uuid: String,
    /// Origin number of the leg.
    #[serde(default)]
    pub from: Option<String>,
    /// Destination number of the leg.
    #[serde(default)]
    pub to: Option<String>,
}

/// Body of the recording-ready webhook (`POST /onEventRecorded`).
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingReadyEvent {
    /// Conversation the recording belongs to.
    pub conversation_uuid: String,
    /// Credentialed URL the recording can be fetched from.
    pub recording_url: String,
}

/// Body of the transcription-ready webhook (`POST /onEventTranscribed`).
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionReadyEvent {
    /// Conversation the transcript belongs to.
    pub conversation_uuid: String,
    /// Credentialed URL the raw transcript can be fetched from.
    pub transcription_url: String,
}

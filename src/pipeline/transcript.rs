//! Transcript ingestion: fetch per-channel utterances, merge, render,
//! notify.

use serde::Deserialize;
use tracing::info;

use crate::models::call_event::TranscriptionReadyEvent;
use crate::server::AppState;
use crate::Result;

/// Raw transcript document as fetched from the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTranscript {
    /// Per-channel utterance lists.
    pub channels: Vec<TranscriptChannel>,
}

/// One audio channel's transcript. Channel 0 carries the customer,
/// channel 1 the agent.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptChannel {
    /// Channel index.
    pub channel: u32,
    /// Utterances in recognition order.
    pub utterances: Vec<Utterance>,
}

/// One recognized utterance.
#[derive(Debug, Clone, Deserialize)]
pub struct Utterance {
    /// Recognized text.
    pub text: String,
    /// Offset from recording start, used only for ordering.
    pub start_ms: u64,
}

/// Speaker role attributed to a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerRole {
    /// Channel 1.
    Agent,
    /// Channel 0.
    Customer,
}

impl SpeakerRole {
    fn label(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Customer => "customer",
        }
    }
}

/// One entry of the merged transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Attributed speaker.
    pub role: SpeakerRole,
    /// Utterance text.
    pub text: String,
    /// Ordering timestamp.
    pub start_ms: u64,
}

/// Merge both channels into one sequence ordered by timestamp.
///
/// The sort is stable and channel 0 entries are enqueued first, so a
/// timestamp tie keeps customer-before-agent order.
#[must_use]
pub fn merge_channels(raw: &RawTranscript) -> Vec<TranscriptEntry> {
    let mut channels: Vec<&TranscriptChannel> = raw.channels.iter().collect();
    channels.sort_by_key(|ch| ch.channel);

    let mut entries: Vec<TranscriptEntry> = channels
        .into_iter()
        .flat_map(|ch| {
            let role = if ch.channel == 1 {
                SpeakerRole::Agent
            } else {
                SpeakerRole::Customer
            };
            ch.utterances.iter().map(move |u| TranscriptEntry {
                role,
                text: u.text.clone(),
                start_ms: u.start_ms,
            })
        })
        .collect();

    entries.sort_by_key(|entry| entry.start_ms);
    entries
}

/// Render merged entries as `[role] text` lines.
#[must_use]
pub fn render(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("[{}] {}", entry.role.label(), entry.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ingest a finished call transcript.
///
/// Fetches the raw per-channel document with a freshly minted
/// credential, merges and renders it, and forwards the text to the
/// backend. Returns the rendered transcript.
///
/// # Errors
///
/// `AppError::MediaFetch` if retrieval or parsing fails,
/// `AppError::Backend` if the notification fails.
pub async fn ingest_transcript(
    state: &AppState,
    event: &TranscriptionReadyEvent,
) -> Result<String> {
    let conversation_id = event.conversation_uuid.as_str();

    let response = state.media.fetch(&event.transcription_url).await?;
    let raw = response.json::<RawTranscript>().await.map_err(|err| {
        crate::AppError::MediaFetch(format!("transcript body invalid: {err}"))
    })?;

    let text = render(&merge_channels(&raw));
    state
        .backend
        .notify_transcript(conversation_id, &text)
        .await?;

    info!(conversation_id, channels = raw.channels.len(), "transcript ingested");
    Ok(text)
}

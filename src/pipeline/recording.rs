//! Recording ingestion: fetch, persist, notify.

use tracing::info;

use crate::models::call_event::RecordingReadyEvent;
use crate::server::AppState;
use crate::Result;

/// Ingest a finished call recording.
///
/// Fetches the recording with a freshly minted credential, streams it
/// into durable storage addressed by conversation id, and forwards the
/// public retrieval URL to the backend. Returns the public URL.
///
/// Any stage failure propagates to the originating webhook as an
/// error; no local retry — redelivery is the platform's concern.
///
/// # Errors
///
/// `AppError::MediaFetch` if retrieval fails, `AppError::Storage` if
/// persisting fails, `AppError::Backend` if the notification fails.
pub async fn ingest_recording(state: &AppState, event: &RecordingReadyEvent) -> Result<String> {
    let conversation_id = event.conversation_uuid.as_str();

    let response = state.media.fetch(&event.recording_url).await?;
    let path = state
        .store
        .save(conversation_id, response.bytes_stream())
        .await?;

    let url = state
        .store
        .public_url(&state.config.public_base_url, conversation_id);
    state.backend.notify_recording(conversation_id, &url).await?;

    info!(conversation_id, path = %path.display(), "recording ingested");
    Ok(url)
}

//! HTTP webhook surface and shared application state.
//!
//! Each webhook callback is handled as an independent, stateless
//! request; the only shared state is read-only configuration and the
//! `Arc`ed outbound clients built once at startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::backend::BackendNotifier;
use crate::directory::{DirectoryClient, OperatorPicker, QueueRecorder};
use crate::models::call_event::{
    CallAnswerEvent, CallStatusEvent, RecordingReadyEvent, TranscriptionReadyEvent,
};
use crate::models::directive::Directive;
use crate::pipeline::{self, MediaFetcher};
use crate::router;
use crate::storage::RecordingStore;
use crate::token::TokenIssuer;
use crate::{AppError, GlobalConfig, Result};

/// Default token subject when `/getToken` is called without a name.
const DEFAULT_OPERATOR_NAME: &str = "Operator";

/// Shared application state: configuration plus the outbound clients.
pub struct AppState {
    /// Process-wide configuration, read-only after startup.
    pub config: Arc<GlobalConfig>,
    /// Operator directory client.
    pub directory: Arc<DirectoryClient>,
    /// Idle-operator picker.
    pub picker: OperatorPicker,
    /// Queue audit recorder.
    pub queue: Arc<QueueRecorder>,
    /// Artifact notification backend.
    pub backend: BackendNotifier,
    /// Durable recording storage.
    pub store: RecordingStore,
    /// Protected media fetcher.
    pub media: MediaFetcher,
    /// Credential issuer.
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Build the full client graph from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the recordings directory cannot
    /// be created and `AppError::Token`/`AppError::Config` if the token
    /// issuer cannot be built from the configured key material.
    pub fn from_config(config: Arc<GlobalConfig>) -> Result<Self> {
        let directory = Arc::new(DirectoryClient::new(&config.directory));
        let picker = OperatorPicker::new(Arc::clone(&directory));
        let queue = Arc::new(QueueRecorder::new(&config.directory));
        let backend = BackendNotifier::new(&config.backend);
        let store = RecordingStore::new(config.recordings_dir.clone())?;
        let tokens = Arc::new(TokenIssuer::new(&config.telephony)?);
        let media = MediaFetcher::new(Arc::clone(&tokens));

        Ok(Self {
            config,
            directory,
            picker,
            queue,
            backend,
            store,
            media,
            tokens,
        })
    }
}

#[derive(Debug, Deserialize)]
struct EventParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenParams {
    name: Option<String>,
}

/// Build the webhook router over shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/onCall", post(on_call))
        .route("/onEvent", post(on_event))
        .route("/onEventRecorded", post(on_event_recorded))
        .route("/onEventTranscribed", post(on_event_transcribed))
        .route("/getToken", get(get_token))
        .route("/_/health", get(health))
        .route("/_/metrics", get(metrics))
        .with_state(state)
}

/// Serve the webhook router until the cancellation token fires.
///
/// # Errors
///
/// Returns `AppError::Config` if the listener cannot bind or the
/// server fails.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let bind = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind on {bind}: {err}")))?;

    info!(%bind, "starting webhook server");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Config(format!("webhook server error: {err}")))?;

    info!("webhook server shut down");
    Ok(())
}

/// `POST /onCall` — produce the call-control response for a new call.
async fn on_call(
    State(state): State<Arc<AppState>>,
    Json(event): Json<CallAnswerEvent>,
) -> Response {
    let conversation_id = event.conversation_uuid.clone();
    match router::route_call(&state, &event).await {
        Ok(directives) => (StatusCode::OK, Json(directives)).into_response(),
        Err(AppError::MalformedEvent(msg)) => {
            warn!(%conversation_id, %msg, "rejecting malformed call event");
            (StatusCode::BAD_REQUEST, Json(Vec::<Directive>::new())).into_response()
        }
        Err(err) => {
            error!(%conversation_id, %err, "call routing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Vec::<Directive>::new()),
            )
                .into_response()
        }
    }
}

/// `POST /onEvent?userId=` — apply a mid-call occupancy transition.
///
/// Always answers 200: internal failures are logged, never surfaced.
async fn on_event(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventParams>,
    Json(event): Json<CallStatusEvent>,
) -> StatusCode {
    match params.user_id {
        Some(operator_id) => {
            router::handle_status_event(&state, &operator_id, &event).await;
        }
        None => {
            warn!(
                conversation_id = %event.conversation_uuid,
                "lifecycle event without userId, ignoring"
            );
        }
    }
    StatusCode::OK
}

/// `POST /onEventRecorded` — ingest a finished recording.
async fn on_event_recorded(
    State(state): State<Arc<AppState>>,
    Json(event): Json<RecordingReadyEvent>,
) -> StatusCode {
    match pipeline::recording::ingest_recording(&state, &event).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!(
                conversation_id = %event.conversation_uuid,
                %err,
                "recording ingestion failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `POST /onEventTranscribed` — ingest a finished transcript.
async fn on_event_transcribed(
    State(state): State<Arc<AppState>>,
    Json(event): Json<TranscriptionReadyEvent>,
) -> StatusCode {
    match pipeline::transcript::ingest_transcript(&state, &event).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!(
                conversation_id = %event.conversation_uuid,
                %err,
                "transcript ingestion failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /getToken?name=` — mint a subject-scoped client credential.
async fn get_token(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TokenParams>,
) -> Response {
    let name = params
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_OPERATOR_NAME.into());

    match state.tokens.mint(Some(&name)) {
        Ok(jwt) => (StatusCode::OK, Json(json!({ "jwt": jwt }))).into_response(),
        Err(err) => {
            error!(%name, %err, "token minting failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /_/health` — liveness probe.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /_/metrics` — metrics probe placeholder.
async fn metrics() -> StatusCode {
    StatusCode::OK
}

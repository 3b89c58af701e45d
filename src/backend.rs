//! Notification client for the external artifact backend.

use serde_json::json;

use crate::config::BackendConfig;
use crate::{AppError, Result};

/// Posts flat key/value artifact notifications to the external backend.
///
/// One POST per artifact type; the backend merges records keyed by
/// conversation id. No retry here: delivery guarantees are owned by
/// the telephony platform's webhook redelivery.
pub struct BackendNotifier {
    http: reqwest::Client,
    base_url: String,
}

impl BackendNotifier {
    /// Build a notifier from backend settings.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Report a stored recording's public URL for a conversation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` on network failure or a non-2xx
    /// response.
    pub async fn notify_recording(&self, conversation_id: &str, url: &str) -> Result<()> {
        self.post(
            "recordings",
            &json!({ "conversation_id": conversation_id, "url": url }),
        )
        .await
    }

    /// Report a rendered transcript for a conversation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` on network failure or a non-2xx
    /// response.
    pub async fn notify_transcript(&self, conversation_id: &str, text: &str) -> Result<()> {
        self.post(
            "transcripts",
            &json!({ "conversation_id": conversation_id, "text": text }),
        )
        .await
    }

    async fn post(&self, path: &str, payload: &serde_json::Value) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("backend notify failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "backend notify returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

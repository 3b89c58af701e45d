//! Fire-and-forget queue audit recorder.

use std::sync::Arc;

use tracing::warn;

use crate::config::DirectoryConfig;
use crate::models::queue_entry::QueueEntry;
use crate::{AppError, Result};

/// Appends call audit records to the external store.
///
/// Every write is best-effort: call sites issue it as a detached task
/// and a failure only ever reaches the log, never the webhook response.
pub struct QueueRecorder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl QueueRecorder {
    /// Build a recorder from directory connection settings.
    #[must_use]
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    /// Append one audit record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` on network failure or a non-2xx
    /// response.
    pub async fn record(&self, entry: &QueueEntry) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/queue", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(entry)
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("queue write failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "queue write returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Append one audit record as a detached task, logging any failure.
    pub fn record_detached(self: &Arc<Self>, entry: QueueEntry) {
        let recorder = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = recorder.record(&entry).await {
                warn!(
                    conversation_id = %entry.conversation_id,
                    status = ?entry.status,
                    %err,
                    "queue audit write failed"
                );
            }
        });
    }
}

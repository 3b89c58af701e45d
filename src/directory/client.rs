//! REST client for the external operator status store.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::config::DirectoryConfig;
use crate::models::operator::{OccupancyStatus, OperatorRecord};
use crate::{AppError, Result};

/// Shared-secret header carried on every store request.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize)]
struct StatusPatch<'a> {
    status: OccupancyStatus,
    conversation_id: &'a str,
    number: &'a str,
}

/// Client for the external operator directory.
///
/// Two operations: a filtered read of idle operators and an
/// unconditional patch-by-identifier write. Both fail with
/// [`AppError::Backend`] on network errors or non-2xx responses;
/// callers decide whether a failure is fatal to the current request.
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectoryClient {
    /// Build a client from directory connection settings.
    #[must_use]
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    /// Read idle operators, ordered longest-idle-first by the store.
    ///
    /// The ordering and limit are hints; the picker re-applies the
    /// selection policy over whatever the store returns.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` on network failure or a non-2xx
    /// response.
    pub async fn fetch_idle(&self) -> Result<Vec<OperatorRecord>> {
        let response = self
            .http
            .get(format!("{}/operators", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("status", "idle"),
                ("order", "last_called_at.asc"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("directory read failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "directory read returned {}",
                response.status()
            )));
        }

        response
            .json::<Vec<OperatorRecord>>()
            .await
            .map_err(|err| AppError::Backend(format!("directory read body invalid: {err}")))
    }

    /// Unconditionally overwrite one operator's occupancy record.
    ///
    /// `conversation_id` and `number` are cleared (empty strings) when
    /// the operator returns to idle.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` on network failure or a non-2xx
    /// response.
    pub async fn write_status(
        &self,
        operator_id: &str,
        status: OccupancyStatus,
        conversation_id: &str,
        number: &str,
    ) -> Result<()> {
        let response = self
            .http
            .patch(format!("{}/operators", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("id", format!("eq.{operator_id}"))])
            .json(&StatusPatch {
                status,
                conversation_id,
                number,
            })
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("directory write failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "directory write returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Issue a status write as a detached task.
    ///
    /// Failures are logged at `warn` and never reach the caller; the
    /// webhook response must not wait on non-critical writes.
    pub fn write_status_detached(
        self: &Arc<Self>,
        operator_id: &str,
        status: OccupancyStatus,
        conversation_id: &str,
        number: &str,
    ) {
        let client = Arc::clone(self);
        let operator_id = operator_id.to_owned();
        let conversation_id = conversation_id.to_owned();
        let number = number.to_owned();
        tokio::spawn(async move {
            if let Err(err) = client
                .write_status(&operator_id, status, &conversation_id, &number)
                .await
            {
                warn!(%operator_id, ?status, %err, "operator status write failed");
            }
        });
    }
}

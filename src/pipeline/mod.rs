//! Post-call artifact pipeline.
//!
//! Two independent branches driven by asynchronous platform callbacks
//! that may arrive in any order or not at all: recording ingestion and
//! transcript ingestion. Each artifact is reported to the backend the
//! moment it is ready; nothing tracks "both received" — the backend
//! merges records keyed by conversation id.

pub mod recording;
pub mod transcript;

use std::sync::Arc;

use crate::token::TokenIssuer;
use crate::{AppError, Result};

/// Fetches protected media with a freshly minted bearer credential.
pub struct MediaFetcher {
    http: reqwest::Client,
    tokens: Arc<TokenIssuer>,
}

impl MediaFetcher {
    /// Build a fetcher over a shared token issuer.
    #[must_use]
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// GET a protected media URL with a service-level token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Token` when minting fails and
    /// `AppError::MediaFetch` on network failure or a non-2xx response.
    pub async fn fetch(&self, url: &str) -> Result<reqwest::Response> {
        let token = self.tokens.mint(None)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| AppError::MediaFetch(format!("fetch of {url} failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::MediaFetch(format!(
                "fetch of {url} returned {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

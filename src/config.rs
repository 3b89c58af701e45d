//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Keychain service name used for credential lookups.
const KEYCHAIN_SERVICE: &str = "switchboard";

/// Telephony platform settings: application identity, outbound caller
/// id, and token minting parameters.
///
/// The signing key is loaded at runtime via OS keychain or environment
/// variable, never from the TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TelephonyConfig {
    /// Platform application identifier embedded in minted tokens.
    pub application_id: String,
    /// Platform-owned number used as the caller id on outbound legs.
    pub service_number: String,
    /// Country calling code for phone-number normalization.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Lifetime of minted tokens in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Token signing algorithm (`RS256` or `HS256`).
    #[serde(default = "default_token_algorithm")]
    pub token_algorithm: String,
    /// Signing key material (populated at runtime).
    #[serde(skip)]
    pub private_key: String,
}

/// Operator directory (external status store) connection settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DirectoryConfig {
    /// Base URL of the operator status store.
    pub base_url: String,
    /// Static shared-secret header value (populated at runtime).
    #[serde(skip)]
    pub api_key: String,
}

/// External backend that receives post-call artifact notifications.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BackendConfig {
    /// Base URL for artifact notifications.
    pub base_url: String,
}

fn default_country_code() -> String {
    "81".into()
}

fn default_token_ttl() -> u64 {
    86400
}

fn default_token_algorithm() -> String {
    "RS256".into()
}

fn default_http_port() -> u16 {
    3000
}

fn default_recordings_dir() -> PathBuf {
    PathBuf::from("recordings")
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// HTTP port the webhook server binds on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Externally reachable base URL used to build callback URLs.
    pub public_base_url: String,
    /// Directory where fetched recordings are persisted.
    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: PathBuf,
    /// Telephony platform settings.
    pub telephony: TelephonyConfig,
    /// Operator directory connection settings.
    pub directory: DirectoryConfig,
    /// Artifact notification backend settings.
    pub backend: BackendConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load runtime credentials from OS keychain with env-var fallback.
    ///
    /// Tries the `switchboard` keyring service first, then falls back to
    /// `DIRECTORY_API_KEY` / `TELEPHONY_PRIVATE_KEY` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars
    /// provide a required credential.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.directory.api_key = load_credential("directory_api_key", "DIRECTORY_API_KEY").await?;
        self.telephony.private_key =
            load_credential("telephony_private_key", "TELEPHONY_PRIVATE_KEY").await?;
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        if self.public_base_url.is_empty() {
            return Err(AppError::Config("public_base_url must not be empty".into()));
        }

        // Callback URLs are built by joining path segments; a trailing
        // slash would produce double slashes the platform rejects.
        while self.public_base_url.ends_with('/') {
            self.public_base_url.pop();
        }

        if !matches!(self.telephony.token_algorithm.as_str(), "RS256" | "HS256") {
            return Err(AppError::Config(format!(
                "unsupported token_algorithm: {}",
                self.telephony.token_algorithm
            )));
        }

        if self.telephony.country_code.is_empty()
            || !self.telephony.country_code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AppError::Config(
                "country_code must be a non-empty digit string".into(),
            ));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<String> {
    let key = keyring_key.to_owned();

    // Try OS keychain first via spawn_blocking (keyring is synchronous I/O).
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYCHAIN_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    // Fallback to environment variable.
    env::var(env_key).map_err(|_| {
        AppError::Config(format!(
            "credential {keyring_key} not found in keychain or {env_key} env var"
        ))
    })
}

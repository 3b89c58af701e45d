//! Short-lived bearer credential minting.
//!
//! Tokens authenticate against the telephony platform: subject-scoped
//! for operator clients (`/getToken`), unscoped (service-level) when
//! the artifact pipeline fetches protected media.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::TelephonyConfig;
use crate::{AppError, Result};

#[derive(Debug, Serialize)]
struct Claims<'a> {
    application_id: &'a str,
    iat: u64,
    exp: u64,
    jti: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<&'a str>,
    acl: Value,
}

/// Platform ACL grant embedded in every minted token.
fn acl_paths() -> Value {
    json!({
        "paths": {
            "/*/users/**": {},
            "/*/conversations/**": {},
            "/*/sessions/**": {},
            "/*/devices/**": {},
            "/*/image/**": {},
            "/*/media/**": {},
            "/*/applications/**": {},
            "/*/push/**": {},
            "/*/knocking/**": {},
            "/*/legs/**": {},
        }
    })
}

/// Signs time-boxed platform credentials.
pub struct TokenIssuer {
    header: Header,
    encoding_key: EncodingKey,
    application_id: String,
    ttl_seconds: u64,
}

impl TokenIssuer {
    /// Build an issuer from telephony settings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Token` if the signing key is not valid for
    /// the configured algorithm, or `AppError::Config` for an unknown
    /// algorithm name.
    pub fn new(config: &TelephonyConfig) -> Result<Self> {
        let (algorithm, encoding_key) = match config.token_algorithm.as_str() {
            "RS256" => (
                Algorithm::RS256,
                EncodingKey::from_rsa_pem(config.private_key.as_bytes())
                    .map_err(|err| AppError::Token(format!("invalid RSA key: {err}")))?,
            ),
            "HS256" => (
                Algorithm::HS256,
                EncodingKey::from_secret(config.private_key.as_bytes()),
            ),
            other => {
                return Err(AppError::Config(format!(
                    "unsupported token_algorithm: {other}"
                )))
            }
        };

        Ok(Self {
            header: Header::new(algorithm),
            encoding_key,
            application_id: config.application_id.clone(),
            ttl_seconds: config.token_ttl_seconds,
        })
    }

    /// Mint a signed token, optionally scoped to a subject.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Token` if the system clock is unusable or
    /// signing fails.
    pub fn mint(&self, subject: Option<&str>) -> Result<String> {
        let iat = u64::try_from(chrono::Utc::now().timestamp())
            .map_err(|_| AppError::Token("system clock is before the epoch".into()))?;

        let claims = Claims {
            application_id: &self.application_id,
            iat,
            exp: iat + self.ttl_seconds,
            jti: uuid::Uuid::new_v4().to_string(),
            sub: subject,
            acl: acl_paths(),
        };

        Ok(encode(&self.header, &claims, &self.encoding_key)?)
    }
}

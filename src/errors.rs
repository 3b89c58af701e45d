//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Operator directory or backend notification call failure.
    Backend(String),
    /// Recording or transcript retrieval failure.
    MediaFetch(String),
    /// Telephony callback missing required discriminating fields.
    MalformedEvent(String),
    /// Credential minting failure.
    Token(String),
    /// Recording storage failure.
    Storage(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Backend(msg) => write!(f, "backend: {msg}"),
            Self::MediaFetch(msg) => write!(f, "media fetch: {msg}"),
            Self::MalformedEvent(msg) => write!(f, "malformed event: {msg}"),
            Self::Token(msg) => write!(f, "token: {msg}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Token(err.to_string())
    }
}

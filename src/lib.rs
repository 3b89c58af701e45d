#![forbid(unsafe_code)]

//! Webhook-driven call-center orchestrator.
//!
//! Sits between a telephony platform and an external operator-status
//! backend: assigns an idle operator to each inbound call (or rejects
//! gracefully), tracks operator occupancy in the external directory,
//! and ingests recording/transcription artifacts after call completion.

pub mod backend;
pub mod config;
pub mod directory;
pub mod errors;
pub mod models;
pub mod phone;
pub mod pipeline;
pub mod router;
pub mod server;
pub mod storage;
pub mod token;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};

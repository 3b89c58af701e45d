//! Call-control directives returned to the telephony platform.
//!
//! A webhook response is an ordered JSON array of directives; the
//! platform executes them in sequence, so array order is semantic
//! (record-then-connect starts recording before the connect leg is
//! established).

use serde::{Deserialize, Serialize};

/// Transcription settings attached to a record directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transcription {
    /// Callback URLs invoked when the transcript is ready.
    #[serde(rename = "eventUrl")]
    pub event_url: Vec<String>,
    /// Transcription language hint.
    pub language: String,
}

/// Endpoint a connect directive bridges the call to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Endpoint {
    /// In-app (WebRTC) endpoint addressed by user name.
    App {
        /// Application user to ring.
        user: String,
    },
    /// PSTN endpoint addressed by number.
    Phone {
        /// Destination number in canonical domestic form.
        number: String,
    },
}

/// One call-control instruction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Directive {
    /// Start recording and transcribing the conversation.
    Record {
        /// Callback URLs invoked when the recording is ready.
        #[serde(rename = "eventUrl")]
        event_url: Vec<String>,
        /// Transcription settings.
        transcription: Transcription,
    },
    /// Bridge the call to an endpoint.
    Connect {
        /// Caller id presented to the connected party.
        from: String,
        /// Callback URLs for per-leg lifecycle events.
        #[serde(rename = "eventUrl")]
        event_url: Vec<String>,
        /// Endpoints to ring (single element in this system).
        endpoint: Vec<Endpoint>,
    },
    /// Speak a text announcement to the caller.
    Talk {
        /// Text to speak.
        text: String,
        /// Speech language.
        language: String,
    },
}

impl Directive {
    /// Whether this directive starts a recording.
    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Whether this directive connects the call.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}

//! Call event router: the per-callback state machine.
//!
//! Classifies each call-answer event, drives the operator picker and
//! directory client, and produces the ordered directive sequence the
//! telephony platform executes. The chosen operator id is threaded
//! through every callback URL — later events have no other way to
//! recover which operator was picked at connect time, and this system
//! deliberately keeps no session state.

use tracing::{debug, info, warn};

use crate::models::call_event::{CallAnswerEvent, CallDirection, CallStatusEvent, LegStatus};
use crate::models::directive::{Directive, Endpoint, Transcription};
use crate::models::operator::OccupancyStatus;
use crate::models::queue_entry::{QueueDirection, QueueEntry, QueueStatus};
use crate::phone;
use crate::server::AppState;
use crate::{AppError, Result};

/// Language used for transcription and spoken announcements.
const LANGUAGE: &str = "ja-JP";

/// Spoken apology when no operator is available.
const UNAVAILABLE_TEXT: &str =
    "申し訳ございません。ただいまオペレーターが対応できません。後ほどおかけ直しください。";

/// Classification of a call-answer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    /// Caller on the public network dialed in.
    InboundPstn {
        /// Raw origin number as the platform sent it.
        from: String,
    },
    /// An operator's app originated the call.
    Outbound {
        /// Initiating operator.
        user: String,
        /// Raw destination number.
        to: String,
    },
    /// Event is missing the discriminating fields.
    Malformed,
}

/// Classify a call-answer event by its discriminating fields.
///
/// An origin number wins over an originating user; an event carrying
/// neither (or an app-originated event without a destination) is
/// malformed.
#[must_use]
pub fn classify(event: &CallAnswerEvent) -> CallKind {
    if let Some(from) = event.from.as_deref().filter(|s| !s.is_empty()) {
        return CallKind::InboundPstn { from: from.into() };
    }
    if let Some(user) = event.from_user.as_deref().filter(|s| !s.is_empty()) {
        if let Some(to) = event.to.as_deref().filter(|s| !s.is_empty()) {
            return CallKind::Outbound {
                user: user.into(),
                to: to.into(),
            };
        }
    }
    CallKind::Malformed
}

fn callback_url(base: &str, path: &str, operator_id: &str) -> String {
    format!("{base}/{path}?userId={operator_id}")
}

fn record_directive(base: &str, operator_id: &str) -> Directive {
    Directive::Record {
        event_url: vec![callback_url(base, "onEventRecorded", operator_id)],
        transcription: Transcription {
            event_url: vec![callback_url(base, "onEventTranscribed", operator_id)],
            language: LANGUAGE.into(),
        },
    }
}

/// Directive pair for an inbound PSTN call assigned to an operator.
///
/// Record comes strictly before connect so recording starts before the
/// operator leg is established.
#[must_use]
pub fn inbound_directives(base: &str, caller: &str, operator_id: &str) -> Vec<Directive> {
    vec![
        record_directive(base, operator_id),
        Directive::Connect {
            from: caller.into(),
            event_url: vec![callback_url(base, "onEvent", operator_id)],
            endpoint: vec![Endpoint::App {
                user: operator_id.into(),
            }],
        },
    ]
}

/// Directive pair for an operator-originated outbound call.
#[must_use]
pub fn outbound_directives(
    base: &str,
    service_number: &str,
    user: &str,
    to: &str,
) -> Vec<Directive> {
    vec![
        record_directive(base, user),
        Directive::Connect {
            from: service_number.into(),
            event_url: vec![callback_url(base, "onEvent", user)],
            endpoint: vec![Endpoint::Phone { number: to.into() }],
        },
    ]
}

/// Single announce-unavailability directive.
#[must_use]
pub fn unavailable_directive() -> Directive {
    Directive::Talk {
        text: UNAVAILABLE_TEXT.into(),
        language: LANGUAGE.into(),
    }
}

/// Produce the call-control response for a call-answer event.
///
/// Queue audit records and ringing/dialing status marks are issued as
/// detached tasks; only the operator pick is awaited, because the
/// response cannot be produced before the pick decision is known.
///
/// # Errors
///
/// Returns `AppError::MalformedEvent` for events missing their
/// discriminating fields (no directory writes are performed) and
/// `AppError::Backend` when the fatal initial pick fails.
pub async fn route_call(state: &AppState, event: &CallAnswerEvent) -> Result<Vec<Directive>> {
    let conversation_id = event.conversation_uuid.as_str();
    match classify(event) {
        CallKind::InboundPstn { from } => route_inbound(state, conversation_id, &from).await,
        CallKind::Outbound { user, to } => route_outbound(state, conversation_id, &user, &to),
        CallKind::Malformed => Err(AppError::MalformedEvent(
            "event carries neither origin number nor originating user".into(),
        )),
    }
}

async fn route_inbound(
    state: &AppState,
    conversation_id: &str,
    raw_from: &str,
) -> Result<Vec<Directive>> {
    let from = phone::normalize(raw_from, &state.config.telephony.country_code)?;

    state.queue.record_detached(QueueEntry {
        conversation_id: conversation_id.into(),
        number: from.clone(),
        status: QueueStatus::Enqueue,
        direction: QueueDirection::Inbound,
    });

    // The pick is fatal: without it no assignment decision exists.
    let Some(operator_id) = state.picker.next_idle().await? else {
        info!(conversation_id, "no idle operator, announcing unavailability");
        return Ok(vec![unavailable_directive()]);
    };

    info!(conversation_id, %operator_id, "assigning inbound call");
    state.directory.write_status_detached(
        &operator_id,
        OccupancyStatus::Ringing,
        conversation_id,
        &from,
    );

    Ok(inbound_directives(
        &state.config.public_base_url,
        &from,
        &operator_id,
    ))
}

fn route_outbound(
    state: &AppState,
    conversation_id: &str,
    user: &str,
    raw_to: &str,
) -> Result<Vec<Directive>> {
    let to = phone::normalize(raw_to, &state.config.telephony.country_code)?;

    state.queue.record_detached(QueueEntry {
        conversation_id: conversation_id.into(),
        number: to.clone(),
        status: QueueStatus::Calling,
        direction: QueueDirection::Outbound,
    });

    info!(conversation_id, operator_id = user, "routing outbound call");
    state
        .directory
        .write_status_detached(user, OccupancyStatus::Dialing, conversation_id, &to);

    Ok(outbound_directives(
        &state.config.public_base_url,
        &state.config.telephony.service_number,
        user,
        &to,
    ))
}

/// Apply a mid-call lifecycle event to the operator's occupancy record.
///
/// Only the outbound-direction leg brackets the operator's busy
/// interval: `answered` binds the operator to the conversation,
/// `completed` clears it back to idle. Everything else is ignored.
/// Write failures are logged and never surfaced; the webhook always
/// answers 200.
pub async fn handle_status_event(state: &AppState, operator_id: &str, event: &CallStatusEvent) {
    if event.direction != CallDirection::Outbound {
        debug!(
            conversation_id = %event.conversation_uuid,
            direction = ?event.direction,
            "ignoring non-outbound lifecycle event"
        );
        return;
    }

    let result = match event.status {
        LegStatus::Answered => {
            let number = remote_number(state, event);
            state
                .directory
                .write_status(
                    operator_id,
                    OccupancyStatus::OnCall,
                    &event.conversation_uuid,
                    &number,
                )
                .await
        }
        LegStatus::Completed => {
            state
                .directory
                .write_status(operator_id, OccupancyStatus::Idle, "", "")
                .await
        }
        LegStatus::Other => {
            debug!(
                conversation_id = %event.conversation_uuid,
                "ignoring lifecycle status"
            );
            return;
        }
    };

    if let Err(err) = result {
        warn!(
            operator_id,
            conversation_id = %event.conversation_uuid,
            %err,
            "occupancy transition write failed"
        );
    }
}

/// Best-effort normalized remote-party number for an outbound leg.
fn remote_number(state: &AppState, event: &CallStatusEvent) -> String {
    let raw = event.from.as_deref().or(event.to.as_deref()).unwrap_or("");
    match phone::normalize(raw, &state.config.telephony.country_code) {
        Ok(number) => number,
        Err(err) => {
            debug!(%err, "leg number not normalizable, storing empty");
            String::new()
        }
    }
}

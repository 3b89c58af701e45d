use switchboard::models::call_event::CallAnswerEvent;
use switchboard::models::directive::{Directive, Endpoint};
use switchboard::router::{
    classify, inbound_directives, outbound_directives, unavailable_directive, CallKind,
};

fn answer_event(from: Option<&str>, from_user: Option<&str>, to: Option<&str>) -> CallAnswerEvent {
    CallAnswerEvent {
        from: from.map(Into::into),
        from_user: from_user.map(Into::into),
        to: to.map(Into::into),
        conversation_uuid: "conv-1".into(),
        uuid: None,
        timestamp: None,
    }
}

// ── classification ──────────────────────────────────────────

#[test]
fn origin_number_classifies_as_inbound_pstn() {
    let event = answer_event(Some("+819012345678"), None, Some("0312345678"));
    assert_eq!(
        classify(&event),
        CallKind::InboundPstn {
            from: "+819012345678".into()
        }
    );
}

#[test]
fn origin_number_wins_over_originating_user() {
    let event = answer_event(Some("+819012345678"), Some("alice"), Some("0312345678"));
    assert!(matches!(classify(&event), CallKind::InboundPstn { .. }));
}

#[test]
fn originating_user_classifies_as_outbound() {
    let event = answer_event(None, Some("alice"), Some("+81312340000"));
    assert_eq!(
        classify(&event),
        CallKind::Outbound {
            user: "alice".into(),
            to: "+81312340000".into()
        }
    );
}

#[test]
fn neither_discriminator_is_malformed() {
    let event = answer_event(None, None, Some("0312345678"));
    assert_eq!(classify(&event), CallKind::Malformed);
}

#[test]
fn empty_string_discriminators_are_malformed() {
    let event = answer_event(Some(""), Some(""), Some("0312345678"));
    assert_eq!(classify(&event), CallKind::Malformed);
}

#[test]
fn outbound_without_destination_is_malformed() {
    let event = answer_event(None, Some("alice"), None);
    assert_eq!(classify(&event), CallKind::Malformed);
}

// ── directive construction ──────────────────────────────────

#[test]
fn inbound_places_record_strictly_before_connect() {
    let directives = inbound_directives("https://pbx.example", "09012345678", "alice");

    assert_eq!(directives.len(), 2);
    assert!(directives[0].is_record());
    assert!(directives[1].is_connect());
}

#[test]
fn inbound_threads_operator_id_through_callback_urls() {
    let directives = inbound_directives("https://pbx.example", "09012345678", "alice");

    let Directive::Record {
        event_url,
        transcription,
    } = &directives[0]
    else {
        panic!("first directive must be record");
    };
    assert_eq!(
        event_url[0],
        "https://pbx.example/onEventRecorded?userId=alice"
    );
    assert_eq!(
        transcription.event_url[0],
        "https://pbx.example/onEventTranscribed?userId=alice"
    );

    let Directive::Connect {
        from,
        event_url,
        endpoint,
    } = &directives[1]
    else {
        panic!("second directive must be connect");
    };
    assert_eq!(from, "09012345678");
    assert_eq!(event_url[0], "https://pbx.example/onEvent?userId=alice");
    assert_eq!(
        endpoint[0],
        Endpoint::App {
            user: "alice".into()
        }
    );
}

#[test]
fn outbound_connects_destination_with_service_caller_id() {
    let directives = outbound_directives("https://pbx.example", "0312345678", "alice", "0398765432");

    assert_eq!(directives.len(), 2);
    assert!(directives[0].is_record());

    let Directive::Connect {
        from, endpoint, ..
    } = &directives[1]
    else {
        panic!("second directive must be connect");
    };
    assert_eq!(from, "0312345678");
    assert_eq!(
        endpoint[0],
        Endpoint::Phone {
            number: "0398765432".into()
        }
    );
}

#[test]
fn unavailability_is_a_single_talk_directive() {
    let directive = unavailable_directive();
    assert!(matches!(directive, Directive::Talk { .. }));
}

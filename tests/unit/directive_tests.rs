use serde_json::{json, Value};

use switchboard::models::directive::{Directive, Endpoint, Transcription};

#[test]
fn record_serializes_with_action_tag_and_event_urls() {
    let directive = Directive::Record {
        event_url: vec!["https://pbx.example/onEventRecorded?userId=alice".into()],
        transcription: Transcription {
            event_url: vec!["https://pbx.example/onEventTranscribed?userId=alice".into()],
            language: "ja-JP".into(),
        },
    };

    let value = serde_json::to_value(&directive).expect("serializes");
    assert_eq!(value["action"], "record");
    assert_eq!(
        value["eventUrl"][0],
        "https://pbx.example/onEventRecorded?userId=alice"
    );
    assert_eq!(
        value["transcription"]["eventUrl"][0],
        "https://pbx.example/onEventTranscribed?userId=alice"
    );
    assert_eq!(value["transcription"]["language"], "ja-JP");
}

#[test]
fn connect_serializes_app_endpoint() {
    let directive = Directive::Connect {
        from: "09012345678".into(),
        event_url: vec!["https://pbx.example/onEvent?userId=alice".into()],
        endpoint: vec![Endpoint::App {
            user: "alice".into(),
        }],
    };

    let value = serde_json::to_value(&directive).expect("serializes");
    assert_eq!(value["action"], "connect");
    assert_eq!(value["from"], "09012345678");
    assert_eq!(
        value["endpoint"],
        json!([{ "type": "app", "user": "alice" }])
    );
}

#[test]
fn connect_serializes_phone_endpoint() {
    let directive = Directive::Connect {
        from: "0312345678".into(),
        event_url: vec![],
        endpoint: vec![Endpoint::Phone {
            number: "0398765432".into(),
        }],
    };

    let value = serde_json::to_value(&directive).expect("serializes");
    assert_eq!(
        value["endpoint"],
        json!([{ "type": "phone", "number": "0398765432" }])
    );
}

#[test]
fn talk_serializes_text_and_language() {
    let directive = Directive::Talk {
        text: "お待ちください".into(),
        language: "ja-JP".into(),
    };

    let value = serde_json::to_value(&directive).expect("serializes");
    assert_eq!(value["action"], "talk");
    assert_eq!(value["text"], "お待ちください");
    assert_eq!(value["language"], "ja-JP");
}

#[test]
fn directive_sequence_serializes_as_ordered_array() {
    let directives = vec![
        Directive::Record {
            event_url: vec![],
            transcription: Transcription {
                event_url: vec![],
                language: "ja-JP".into(),
            },
        },
        Directive::Talk {
            text: "x".into(),
            language: "ja-JP".into(),
        },
    ];

    let value = serde_json::to_value(&directives).expect("serializes");
    let Value::Array(items) = value else {
        panic!("directive sequence must serialize to an array");
    };
    assert_eq!(items[0]["action"], "record");
    assert_eq!(items[1]["action"], "talk");
}

//! Tests for mid-call occupancy transitions (`POST /onEvent`).

use serde_json::json;

use super::test_helpers::{spawn_app, spawn_stub};

async fn post_event(app: &str, query: &str, body: &serde_json::Value) -> reqwest::StatusCode {
    reqwest::Client::new()
        .post(format!("{app}/onEvent{query}"))
        .json(body)
        .send()
        .await
        .expect("POST /onEvent")
        .status()
}

#[tokio::test]
async fn outbound_answered_binds_operator_to_conversation() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let status = post_event(
        &app,
        "?userId=alice",
        &json!({
            "status": "answered",
            "direction": "outbound",
            "conversation_uuid": "conv-1",
            "from": "+819011112222"
        }),
    )
    .await;

    assert_eq!(status, 200);
    let state = stub.state.lock().await;
    assert_eq!(state.status_writes.len(), 1);
    let (id, body) = &state.status_writes[0];
    assert_eq!(id, "alice");
    assert_eq!(body["status"], "on_call");
    assert_eq!(body["conversation_id"], "conv-1");
    assert_eq!(body["number"], "09011112222");
}

#[tokio::test]
async fn answered_then_completed_leaves_operator_idle() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    post_event(
        &app,
        "?userId=alice",
        &json!({
            "status": "answered",
            "direction": "outbound",
            "conversation_uuid": "conv-1",
            "from": "+819011112222"
        }),
    )
    .await;

    // Unrelated inbound-direction event for another conversation must
    // not disturb alice's occupancy tracking.
    post_event(
        &app,
        "?userId=alice",
        &json!({
            "status": "completed",
            "direction": "inbound",
            "conversation_uuid": "conv-other"
        }),
    )
    .await;

    post_event(
        &app,
        "?userId=alice",
        &json!({
            "status": "completed",
            "direction": "outbound",
            "conversation_uuid": "conv-1"
        }),
    )
    .await;

    let state = stub.state.lock().await;
    assert_eq!(state.status_writes.len(), 2, "inbound event writes nothing");
    let (id, body) = state.status_writes.last().expect("final write");
    assert_eq!(id, "alice");
    assert_eq!(body["status"], "idle");
    assert_eq!(body["conversation_id"], "");
    assert_eq!(body["number"], "");
}

#[tokio::test]
async fn inbound_direction_events_are_ignored() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let status = post_event(
        &app,
        "?userId=alice",
        &json!({
            "status": "answered",
            "direction": "inbound",
            "conversation_uuid": "conv-1"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert!(stub.state.lock().await.status_writes.is_empty());
}

#[tokio::test]
async fn untracked_status_is_ignored() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let status = post_event(
        &app,
        "?userId=alice",
        &json!({
            "status": "ringing",
            "direction": "outbound",
            "conversation_uuid": "conv-1"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert!(stub.state.lock().await.status_writes.is_empty());
}

#[tokio::test]
async fn missing_user_id_still_answers_200() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let status = post_event(
        &app,
        "",
        &json!({
            "status": "answered",
            "direction": "outbound",
            "conversation_uuid": "conv-1"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert!(stub.state.lock().await.status_writes.is_empty());
}

//! Tests for the thin wrapper endpoints: token issuance and probes.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use super::test_helpers::{spawn_app, spawn_stub};

fn decode_claims(token: &str) -> Value {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Value>(
        token,
        &DecodingKey::from_secret(b"test-secret"),
        &validation,
    )
    .expect("token verifies")
    .claims
}

#[tokio::test]
async fn get_token_mints_subject_scoped_jwt() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let response = reqwest::get(format!("{app}/getToken?name=alice"))
        .await
        .expect("GET /getToken");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json body");
    let jwt = body["jwt"].as_str().expect("jwt field");

    let claims = decode_claims(jwt);
    assert_eq!(claims["sub"], "alice");
    assert_eq!(claims["application_id"], "app-1234");
}

#[tokio::test]
async fn get_token_defaults_subject_to_operator() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let response = reqwest::get(format!("{app}/getToken"))
        .await
        .expect("GET /getToken");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json body");
    let claims = decode_claims(body["jwt"].as_str().expect("jwt field"));
    assert_eq!(claims["sub"], "Operator");
}

#[tokio::test]
async fn probes_return_200() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let health = reqwest::get(format!("{app}/_/health"))
        .await
        .expect("GET /_/health");
    assert_eq!(health.status(), 200);

    let metrics = reqwest::get(format!("{app}/_/metrics"))
        .await
        .expect("GET /_/metrics");
    assert_eq!(metrics.status(), 200);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let stub = spawn_stub().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let (app, _state) = spawn_app(&stub, temp.path()).await;

    let response = reqwest::get(format!("{app}/nonexistent"))
        .await
        .expect("GET /nonexistent");
    assert_eq!(response.status(), 404);
}

//! HTTP API tests
//!
//! Drives the full router in-process with a scripted model behind it.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::ScriptedLlm;
use ingres_backend::config::{Config, GeminiConfig, ServerConfig};
use ingres_backend::{create_app, AppState};
use shared::Dataset;

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        gemini: GeminiConfig {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            base_url: "http://localhost".to_string(),
            timeout_secs: 5,
        },
    }
}

fn app(llm: Arc<ScriptedLlm>) -> Router {
    create_app(AppState::new(test_config(), Dataset::embedded(), llm))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_message(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/chat/messages")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_model_and_record_count() {
    let (status, body) = send(app(ScriptedLlm::new()), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["records"], 30);
}

#[tokio::test]
async fn districts_lists_names_and_years() {
    let (status, body) = send(app(ScriptedLlm::new()), get("/api/v1/districts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["districts"].as_array().unwrap().len(), 5);
    assert_eq!(body["latest_year"], 2025);
    assert_eq!(body["forecast_year"], 2026);
}

#[tokio::test]
async fn district_records_use_dataset_field_names() {
    let (status, body) = send(
        app(ScriptedLlm::new()),
        get("/api/v1/districts/madurai/records"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["District"], "Madurai");
    assert_eq!(rows[0]["Year"], 2020);
    assert!(rows[0]["Recharge_MCM"].is_number());
    assert!(rows[0]["WaterLevel_m"].is_number());
}

#[tokio::test]
async fn unknown_district_records_is_not_found() {
    let (status, body) = send(
        app(ScriptedLlm::new()),
        get("/api/v1/districts/Atlantis/records"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn languages_table_has_eleven_entries() {
    let (status, body) = send(app(ScriptedLlm::new()), get("/api/v1/languages")).await;
    assert_eq!(status, StatusCode::OK);
    let languages = body.as_array().unwrap();
    assert_eq!(languages.len(), 11);
    assert_eq!(languages[0]["code"], "en-US");
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let llm = ScriptedLlm::new();
    let (status, body) = send(app(llm.clone()), post_message(json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "text");
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn message_returns_appended_entries() {
    let llm = ScriptedLlm::with_replies(["[SHOW_GRAPH:Chennai]"]);
    let (status, body) = send(
        app(llm),
        post_message(json!({ "text": "Chennai trend", "language": "ta-IN" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["sender"], "user");
    assert_eq!(entries[0]["text"], "Chennai trend");
    assert_eq!(entries[1]["sender"], "assistant");
    assert_eq!(entries[1]["type"], "graph");
    assert_eq!(entries[1]["records"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn transcript_and_status_follow_the_turn() {
    let llm = ScriptedLlm::with_replies(["Hello there."]);
    let app = app(llm);

    let (_, status) = send(app.clone(), get("/api/v1/chat/status")).await;
    assert_eq!(status["state"], "idle");
    assert_eq!(status["busy"], false);

    let (code, _) = send(app.clone(), post_message(json!({ "text": "hi" }))).await;
    assert_eq!(code, StatusCode::OK);

    let (_, transcript) = send(app.clone(), get("/api/v1/chat/transcript")).await;
    let texts: Vec<&str> = transcript
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(&texts[1..], &["hi", "Hello there."]);

    let (_, status) = send(app, get("/api/v1/chat/status")).await;
    assert_eq!(status["state"], "idle");
}

#[tokio::test]
async fn root_and_health_probe_respond() {
    let app = app(ScriptedLlm::new());
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

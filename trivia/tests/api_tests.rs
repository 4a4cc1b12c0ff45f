//! Router-level tests for the trivia service

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use refdata_core::constants::QUESTIONS;
use refdata_core::core::{AppState, Config, Service};
use refdata_core::storage::{typed, MemoryStore};
use refdata_core::{DocumentStore, Filter, Question};
use trivia_server::api::create_app;
use trivia_server::{builtin_questions, seed_questions, SeedOutcome};

const PAGE: &str = "<!DOCTYPE html><title>wwyd</title>";

fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("default.html"), PAGE).unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('wwyd');").unwrap();
    dir
}

fn bundled_state() -> Arc<AppState<MemoryStore>> {
    let mut config = Config::for_service(Service::Trivia);
    config.store.uri = "memory://".to_string();
    Arc::new(AppState::new(Arc::new(MemoryStore::new()), config))
}

fn app_state(static_dir: &Path) -> Arc<AppState<MemoryStore>> {
    let mut config = Config::for_service(Service::Trivia);
    config.store.uri = "memory://".to_string();
    config.assets.static_dir = Some(static_dir.to_path_buf());
    Arc::new(AppState::new(Arc::new(MemoryStore::new()), config))
}

async fn get_with_type(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let (status, _, body) = get_with_type(app, uri).await;
    (status, body)
}

#[tokio::test]
async fn questions_endpoint_returns_the_seeded_set() {
    let dir = static_dir();
    let state = app_state(dir.path());
    seed_questions(state.store()).await.unwrap();

    let (status, body) = get(create_app(state), "/api/questions").await;
    assert_eq!(status, StatusCode::OK);

    let questions: Vec<Question> = serde_json::from_slice(&body).unwrap();
    assert_eq!(questions, builtin_questions());

    // Hints are omitted, not null, for hot-seat prompts
    let raw: Value = serde_json::from_slice(&body).unwrap();
    let hot = raw.as_array().unwrap().iter().find(|q| q["id"] == "hot-1").unwrap();
    assert!(hot.get("hint").is_none());
    assert_eq!(raw[0]["hint"], "Discuss honesty vs risk");
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let dir = static_dir();
    let (status, body) = get(create_app(app_state(dir.path())), "/api/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn seeding_a_populated_store_changes_nothing() {
    let dir = static_dir();
    let state = app_state(dir.path());
    let existing = vec![
        Question::new("wwyd-1", "wwyd", "An edited prompt").with_hint("kept as is"),
        Question::new("party-1", "party", "Pineapple on pizza?"),
    ];
    typed::insert_all(state.store(), QUESTIONS, &existing).await.unwrap();

    assert_eq!(seed_questions(state.store()).await.unwrap(), SeedOutcome::AlreadyPresent(2));
    assert_eq!(seed_questions(state.store()).await.unwrap(), SeedOutcome::AlreadyPresent(2));
    assert_eq!(state.store().count(QUESTIONS, &Filter::all()).await.unwrap(), 2);

    let (_, body) = get(create_app(state), "/api/questions").await;
    let questions: Vec<Question> = serde_json::from_slice(&body).unwrap();
    assert_eq!(questions, existing);
}

#[tokio::test]
async fn default_config_serves_the_bundled_pages() {
    let app = create_app(bundled_state());

    let (status, content_type, body) = get_with_type(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(String::from_utf8(body).unwrap(), include_str!("../static/default.html"));

    let (status, content_type, body) = get_with_type(app.clone(), "/static/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().contains("javascript"));
    assert_eq!(String::from_utf8(body).unwrap(), include_str!("../static/app.js"));

    let (status, content_type, _) = get_with_type(app.clone(), "/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/css"));

    let (status, _) = get(app.clone(), "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app, "/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bundled_pages_do_not_depend_on_the_working_directory() {
    std::env::set_current_dir(std::env::temp_dir()).unwrap();

    let (status, _) = get(create_app(bundled_state()), "/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn root_serves_the_default_page() {
    let dir = static_dir();
    let (status, body) = get(create_app(app_state(dir.path())), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), PAGE);
}

#[tokio::test]
async fn static_dir_override_serves_other_paths_from_disk() {
    let dir = static_dir();
    let app = create_app(app_state(dir.path()));

    let (status, body) = get(app.clone(), "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('wwyd');");

    let (status, _) = get(app.clone(), "/static/app.js").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(app, "/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_default_page_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _) = get(create_app(app_state(dir.path())), "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_service_and_version() {
    let dir = static_dir();
    let (status, body) = get(create_app(app_state(dir.path())), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["service"], "trivia-server");
    assert_eq!(body["status"], "healthy");
}

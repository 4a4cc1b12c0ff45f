//! Router-level tests for the geographic reference API

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use refdata_core::constants::{COUNTRIES, LGAS, STATES};
use refdata_core::core::{AppState, Config, Service};
use refdata_core::storage::{typed, MemoryStore};
use refdata_core::{
    Country, CountryStatus, DocumentStore, EntityId, Filter, Lga, State, StoreError,
};
use refdata_server::api::create_app;

fn memory_state() -> Arc<AppState<MemoryStore>> {
    let mut config = Config::for_service(Service::Geo);
    config.store.uri = "memory://".to_string();
    Arc::new(AppState::new(Arc::new(MemoryStore::new()), config))
}

fn country(name: &str, status: CountryStatus) -> Country {
    Country {
        id: EntityId::generate(),
        name: name.to_string(),
        iso2: name[..2].to_uppercase(),
        dial_code: "+0".to_string(),
        flag: String::new(),
        currency_code: "XXX".to_string(),
        currency_symbol: "¤".to_string(),
        currency_name: "Test".to_string(),
        status,
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn countries_list_all_and_active_only() {
    let state = memory_state();
    let nigeria = country("Nigeria", CountryStatus::Active);
    let atlantis = country("Atlantis", CountryStatus::Inactive);
    typed::insert_all(state.store(), COUNTRIES, &[nigeria.clone(), atlantis]).await.unwrap();

    let (status, all) = get_json(create_app(state.clone()), "/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, active) = get_json(create_app(state), "/countries/active").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active, json!([serde_json::to_value(&nigeria).unwrap()]));
    assert_eq!(active[0]["status"], "active");
}

#[tokio::test]
async fn empty_store_lists_are_empty_arrays() {
    let app = create_app(memory_state());
    let id = EntityId::generate();

    for uri in [
        "/countries".to_string(),
        "/countries/active".to_string(),
        format!("/states/{}", id),
        format!("/lgas/{}", id),
        format!("/cities/{}", id),
    ] {
        let (status, body) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}

#[tokio::test]
async fn states_and_lgas_are_filtered_by_parent() {
    let state = memory_state();
    let (nigeria, ghana) = (EntityId::generate(), EntityId::generate());
    let lagos = State::new("Lagos", nigeria);
    typed::insert_all(state.store(), STATES, &[lagos.clone(), State::new("Ashanti", ghana)])
        .await
        .unwrap();
    typed::insert_all(
        state.store(),
        LGAS,
        &[Lga::new("Ikeja", lagos.id), Lga::new("Kumasi", EntityId::generate())],
    )
    .await
    .unwrap();

    let (_, states) = get_json(create_app(state.clone()), &format!("/states/{}", nigeria)).await;
    assert_eq!(states, json!([{"id": lagos.id.to_string(), "name": "Lagos", "country_id": nigeria.to_string()}]));

    // Upper-case hex refers to the same id
    let upper = lagos.id.to_string().to_uppercase();
    let (status, lgas) = get_json(create_app(state), &format!("/lgas/{}", upper)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lgas.as_array().unwrap().len(), 1);
    assert_eq!(lgas[0]["name"], "Ikeja");
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let app = create_app(memory_state());

    for uri in ["/states/not-an-id", "/lgas/123", "/cities/zzzzzzzzzzzzzzzzzzzzzzzz"] {
        let (status, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(String::from_utf8(body).unwrap().starts_with("Invalid identifier"));
    }

    let (status, _) = post_json(app, "/cities/abc", r#"["Ikeja"]"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn city_append_reports_inserted_duplicates_and_blanks() {
    let state = memory_state();
    let lagos = EntityId::generate();
    let uri = format!("/cities/{}", lagos);

    let (status, body) = post_json(create_app(state.clone()), &uri, r#"["Lagos", "  ", "lagos", "Ikeja"]"#).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Cities added successfully");
    let inserted: Vec<&str> = body["inserted"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(inserted, vec!["Lagos", "Ikeja"]);
    assert_eq!(body["duplicates"], json!(["lagos"]));
    assert_eq!(body["blank"], 1);

    let (_, cities) = get_json(create_app(state), &uri).await;
    assert_eq!(cities.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn city_append_rejects_bodies_that_are_not_string_arrays() {
    let app = create_app(memory_state());
    let uri = format!("/cities/{}", EntityId::generate());

    for body in [r#"{"name": "Ikeja"}"#, r#"[1, 2]"#, r#"["Ikeja""#] {
        let (status, _) = post_json(app.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }

    // Missing content type
    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .body(Body::from(r#"["Ikeja"]"#))
        .unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Store whose every call fails
struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find(&self, _: &str, _: &Filter) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn insert_one(&self, _: &str, _: Value) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn insert_many(&self, _: &str, _: Vec<Value>) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn delete_all(&self, _: &str) -> Result<u64, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn count(&self, _: &str, _: &Filter) -> Result<u64, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }
}

#[tokio::test]
async fn store_failures_are_generic_server_errors() {
    let state = Arc::new(AppState::new(Arc::new(FailingStore), Config::for_service(Service::Geo)));
    let app = create_app(state);
    let id = EntityId::generate();

    for uri in ["/countries".to_string(), format!("/states/{}", id), format!("/lgas/{}", id)] {
        let (status, body) = get(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(String::from_utf8(body).unwrap(), "internal server error");
    }

    let (status, _) = post_json(app, &format!("/cities/{}", id), r#"["Ikeja"]"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_service_and_version() {
    let (status, body) = get_json(create_app(memory_state()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "refdata-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

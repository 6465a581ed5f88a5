mod common;

use axum::http::StatusCode;
use std::sync::Arc;

use common::UnreachableStore;
use redis_url_shortener::utils::code_generator::RandomCodeGenerator;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_memory_state();
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _store) = common::create_memory_state();
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("store").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded_when_store_down() {
    let state = common::create_test_state(
        Arc::new(UnreachableStore::default()),
        Arc::new(RandomCodeGenerator::new()),
    );
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}

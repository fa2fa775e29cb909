//! Integration tests for service info, health and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, test_state, FakeUpstream};
use highcommand_core::status_keys::UPSTREAM_API_AVAILABLE;

// ---------------------------------------------------------------------------
// Test: GET /api/health reports store, collector and upstream state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_offline_before_first_cycle() {
    let state = test_state(FakeUpstream::offline()).await;
    let response = get(build_test_app(state), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
    assert_eq!(json["collector_running"], false);
    assert_eq!(json["upstream_api"], "offline");
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_reads_upstream_flag() {
    let state = test_state(FakeUpstream::offline()).await;
    state.store.set_flag(UPSTREAM_API_AVAILABLE, true).await;

    let json = body_json(get(build_test_app(state), "/api/health").await).await;
    assert_eq!(json["upstream_api"], "online");
}

#[tokio::test]
async fn health_does_not_call_upstream() {
    let upstream = FakeUpstream::offline();
    let state = test_state(upstream.clone()).await;

    get(build_test_app(state), "/api/health").await;
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn health_shows_running_collector() {
    let state = test_state(FakeUpstream::offline()).await;
    assert!(state.collector.start().await);

    let json = body_json(get(build_test_app(state.clone()), "/api/health").await).await;
    assert_eq!(json["collector_running"], true);

    assert!(state.collector.stop().await);
}

#[tokio::test]
async fn health_is_degraded_without_database() {
    let state = test_state(FakeUpstream::offline()).await;
    state.store.pool().close().await;

    let response = get(build_test_app(state), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: GET / returns service info
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_describes_service() {
    let state = test_state(FakeUpstream::offline()).await;
    let json = body_json(get(build_test_app(state), "/").await).await;

    assert_eq!(json["name"], "High Command API");
    assert!(json["version"].is_string());
    assert!(json["description"].is_string());
}

// ---------------------------------------------------------------------------
// Test: general HTTP behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let state = test_state(FakeUpstream::offline()).await;
    let response = get(build_test_app(state), "/api/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let state = test_state(FakeUpstream::offline()).await;
    let response = get(build_test_app(state), "/api/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

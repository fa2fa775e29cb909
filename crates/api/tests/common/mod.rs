#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use highcommand_api::background::collector::Collector;
use highcommand_api::config::ServerConfig;
use highcommand_api::router::build_app_router;
use highcommand_api::state::AppState;
use highcommand_db::Store;
use highcommand_upstream::{Target, Upstream, UpstreamError};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fake upstream
// ---------------------------------------------------------------------------

/// Scripted [`Upstream`]: answers from a path-to-document map and fails
/// with HTTP 503 for anything not in it.
#[derive(Default)]
pub struct FakeUpstream {
    responses: Mutex<HashMap<String, Value>>,
    calls: AtomicUsize,
}

impl FakeUpstream {
    /// An upstream where every fetch fails.
    pub fn offline() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(responses: &[(Target, Value)]) -> Arc<Self> {
        let fake = Self::default();
        for (target, value) in responses {
            fake.set(*target, value.clone());
        }
        Arc::new(fake)
    }

    pub fn set(&self, target: Target, value: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(target.path(), value);
    }

    pub fn fail(&self, target: Target) {
        self.responses.lock().unwrap().remove(&target.path());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn fetch(&self, target: Target) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .get(&target.path())
            .cloned()
            .ok_or(UpstreamError::Status { status: 503 })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// An in-memory store with migrations applied.
pub async fn test_store() -> Store {
    let pool = highcommand_db::create_pool("sqlite::memory:").await.unwrap();
    highcommand_db::run_migrations(&pool).await.unwrap();
    Store::new(pool)
}

/// Default configuration, as if no environment variables were set.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|_| None).unwrap()
}

pub async fn test_state(upstream: Arc<FakeUpstream>) -> AppState {
    let store = test_store().await;
    state_with(upstream, store, test_config().live_fetch_timeout)
}

/// State over any [`Upstream`], with an explicit live-fetch deadline.
pub fn state_with(
    upstream: Arc<dyn Upstream>,
    store: Store,
    live_fetch_timeout: Duration,
) -> AppState {
    let collector = Arc::new(Collector::new(
        upstream,
        store.clone(),
        Duration::from_secs(3600),
    ));
    AppState {
        store,
        collector,
        live_fetch_timeout,
    }
}

/// Build the full application router (same middleware stack as `main`).
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use roster_bridge::app::{AppState, router};
use roster_bridge::audit::AuditClock;
use roster_bridge::memory::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// The sheet from the login/update walkthrough
pub fn roster() -> MemoryStore {
    MemoryStore::from_rows(&[
        &["Roll", "Name", "Score"],
        &["101", "Asha", "70"],
        &["102", "Ravi", "64"],
    ])
}

pub fn app(store: MemoryStore) -> (Router, Arc<AppState<MemoryStore>>) {
    let state = Arc::new(AppState::new(store, AuditClock::default()));
    (router(state.clone(), None), state)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

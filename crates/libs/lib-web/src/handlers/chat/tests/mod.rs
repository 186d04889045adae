//! # Chat Handler Tests
//!
//! Drives the full router against a throwaway AI service bound to a local port.

mod send;

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use lib_core::{CacheStore, Config, MemoryStore};
use lib_utils::RandomIdGenerator;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_ai_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test AI service");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// AI service that answers every message, with audio when asked
pub fn echo_ai_service() -> Router {
    Router::new()
        .route(
            "/generate",
            post(|Json(body): Json<Value>| async move {
                let message = body["message"].as_str().unwrap_or_default().to_string();
                let audio_filename = body["generate_audio"]
                    .as_bool()
                    .unwrap_or(false)
                    .then_some("reply.wav");
                Json(json!({
                    "success": true,
                    "text": format!("Ответ на: {}", message),
                    "audio_filename": audio_filename,
                    "user_id": body["user_id"],
                    "processing_time": 0.5
                }))
            }),
        )
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
}

/// Create test config pointing at `ai_service_url`
pub fn test_config(ai_service_url: &str) -> Config {
    Config {
        ai_service_url: ai_service_url.to_string(),
        ai_timeout_secs: 1,
        ..Default::default()
    }
}

/// Create test app over an in-memory store; the store is returned for inspection
pub fn test_app(config: Config) -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let shared: Arc<dyn CacheStore> = Arc::new(store.clone());
    let state = AppState::new(config, shared, Arc::new(RandomIdGenerator))
        .expect("Failed to build app state");
    (create_router(state, "static", &[]), store)
}

pub async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

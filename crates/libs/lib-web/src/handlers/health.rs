//! # Health Handler
//!
//! Liveness probe for the gateway. Always answers 200; the AI service state is
//! reported in the body so an orchestrator can tell the two apart.

use crate::services::AiServiceClient;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub ai_service: &'static str,
}

/// **Route**: `GET /health`
pub async fn health(State(ai): State<Arc<AiServiceClient>>) -> Json<HealthResponse> {
    let ai_service = if ai.health().await {
        "ok"
    } else {
        warn!("[HEALTH] AI service at {} is unreachable", ai.base_url());
        "unreachable"
    };

    Json(HealthResponse {
        status: "ok",
        service: "chat-gateway",
        ai_service,
    })
}

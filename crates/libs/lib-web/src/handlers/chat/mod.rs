//! # Chat Handlers
//!
//! JSON endpoints used by the chat page.
//!
//! ## Endpoints
//!
//! - `POST /api/chat/send` - Forward a message to the AI service
//! - `GET /api/chat/questions` - Canned questions
//! - `GET /api/chat/history/{user_id}` - Stored history for a user
//!
//! ## Request Examples
//!
//! ```bash
//! curl -X POST http://localhost:8000/api/chat/send \
//!   -H 'content-type: application/json' \
//!   -d '{"message":"Привет","generate_audio":true}'
//!
//! curl http://localhost:8000/api/chat/history/user_3f2a9c
//! ```
//!
//! Every failure is answered with the JSON error envelope from
//! [`AppError`](lib_core::AppError); nothing escapes as a bare 500.

use crate::services::ChatService;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use lib_core::dto::{ApiResponse, ChatRequest, ChatResponse, HistoryData, QuestionAnswer};
use lib_core::AppError;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[cfg(test)]
mod tests;

/// Send a chat message.
///
/// **Route**: `POST /api/chat/send`
///
/// # Returns
///
/// Success (200): `{ "success": true, "data": ChatResponse }`
///
/// Error (422): invalid message or malformed JSON
/// Error (503): AI service unreachable; body carries `fallback_text`
/// Error (500): AI service reported a failure, or an internal error
#[instrument(skip_all)]
pub async fn send_message(
    State(chat): State<Arc<ChatService>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatResponse>>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("[CHAT] Rejected body: {}", rejection.body_text());
        AppError::Validation(rejection.body_text())
    })?;

    info!(
        user_id = ?request.user_id,
        generate_audio = request.generate_audio,
        "[CHAT] Message received"
    );

    let response = chat.send_message(request).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// Canned questions.
///
/// **Route**: `GET /api/chat/questions`
///
/// Returns a bare JSON array of `{ question, answer }`, always in the same order.
pub async fn get_questions() -> Json<Vec<QuestionAnswer>> {
    Json(ChatService::questions())
}

/// Stored history for one user.
///
/// **Route**: `GET /api/chat/history/{user_id}`
///
/// # Returns
///
/// Success (200): `{ "success": true, "data": { user_id, history, total_messages } }`
///
/// Error (500): the history store failed; the store's message is returned as-is
#[instrument(skip(chat))]
pub async fn get_history(
    State(chat): State<Arc<ChatService>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<HistoryData>>, AppError> {
    let data = chat.get_history(&user_id).await?;
    debug!("[CHAT] History for {}: {} messages", user_id, data.total_messages);
    Ok(Json(ApiResponse::ok(data)))
}

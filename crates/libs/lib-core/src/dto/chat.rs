//! # Chat Data Transfer Objects
//!
//! Request and response structures for the browser-facing chat endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/chat/send` - [`ChatRequest`] -> [`ApiResponse<ChatResponse>`] or [`ErrorResponse`]
//! - `GET /api/chat/history/{user_id}` - [`ApiResponse<HistoryData>`]
//! - `GET /api/chat/questions` - `Vec<`[`QuestionAnswer`]`>`
//!
//! ## Wire Format
//!
//! Field names are snake_case. Optional fields are omitted when `None`.
//!
//! ```text
//! POST /api/chat/send
//! { "message": "Привет", "generate_audio": true }
//!
//! 200 OK
//! {
//!   "success": true,
//!   "data": {
//!     "text": "Здравствуйте!",
//!     "user_id": "user_3f2a...",
//!     "timestamp": "2025-01-01T10:00:00.000000+00:00",
//!     "audio_url": "http://llm-service:5000/audio/9c1e.wav"
//!   }
//! }
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Incoming chat message from the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Required, 1-1000 characters after trimming
    #[serde(default)]
    pub message: String,
    /// Generated when absent or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Accepts `true`, `false`, `1`, `0`, `"1"` and `"0"`; `null` counts as absent
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub generate_audio: bool,
}

/// Lenient boolean used by form-style clients.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(flag)) => Ok(flag),
        Some(Flag::Int(0)) => Ok(false),
        Some(Flag::Int(1)) => Ok(true),
        Some(Flag::Text(text)) if text == "0" => Ok(false),
        Some(Flag::Text(text)) if text == "1" => Ok(true),
        Some(_) => Err(D::Error::custom("The generate audio field must be true or false.")),
    }
}

/// Successful reply to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub text: String,
    pub user_id: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// One stored exchange in a user's history. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessageRecord {
    pub user_message: String,
    pub ai_response: String,
    pub timestamp: String,
}

impl ChatMessageRecord {
    pub fn new(user_message: impl Into<String>, ai_response: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// History payload for `GET /api/chat/history/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryData {
    pub user_id: String,
    pub history: Vec<ChatMessageRecord>,
    pub total_messages: usize,
}

/// Canned question shown as a suggestion in the chat page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Error envelope: `{ "success": false, "error": ..., "fallback_text"?: ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_text: Option<String>,
}

// endregion: --- Tests

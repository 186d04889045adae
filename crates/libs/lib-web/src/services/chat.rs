//! # Chat Service
//!
//! Business logic behind the chat endpoints: validates a message, forwards it to
//! the AI service, records the exchange in the history cache, and shapes the reply.
//!
//! ## Flow
//!
//! ```text
//! validate → AiServiceClient::generate ─┬─ success → HistoryCache::append → ChatResponse
//!                                       └─ failure → AppError
//! ```
//!
//! ## Errors
//!
//! [`ChatService::send_message`] only ever returns:
//! - `AppError::Validation` - bad input, nothing was sent upstream
//! - `AppError::UpstreamUnavailable` - the AI service could not be reached
//! - `AppError::Upstream` - the AI service reported a failure
//! - `AppError::Internal` - anything else (history write failures included)

use crate::services::ai_client::AiServiceClient;
use lib_core::dto::{ChatMessageRecord, ChatRequest, ChatResponse, GenerateRequest, HistoryData, QuestionAnswer};
use lib_core::{AppError, HistoryCache, Result};
use lib_utils::{format_time, now_utc, validate_max_chars, validate_not_empty, IdGenerator};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Maximum message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Error text used when the AI service fails without saying why.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Service for chat operations.
pub struct ChatService {
    ai: Arc<AiServiceClient>,
    history: Arc<HistoryCache>,
    ids: Arc<dyn IdGenerator>,
}

impl ChatService {
    pub fn new(ai: Arc<AiServiceClient>, history: Arc<HistoryCache>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { ai, history, ids }
    }

    /// Send one message to the AI service and record the exchange.
    #[instrument(skip(self, request), fields(chars = request.message.chars().count()))]
    pub async fn send_message(&self, request: ChatRequest) -> Result<ChatResponse> {
        let message = validate_message(&request.message)?;

        let user_id = request
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.ids.generate());

        let generated = self
            .ai
            .generate(&GenerateRequest {
                message: message.to_string(),
                user_id: user_id.clone(),
                generate_audio: request.generate_audio,
            })
            .await?;

        let audio_url = generated.audio_filename().map(|name| self.ai.audio_url(name));

        let text = match (generated.success, generated.text) {
            (true, Some(text)) => text,
            _ => {
                let reason = generated
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                return Err(AppError::Upstream(reason));
            }
        };

        let timestamp = format_time(now_utc());

        self.history
            .append(&user_id, ChatMessageRecord::new(message, text.as_str(), timestamp.as_str()))
            .await
            .map_err(|e| {
                error!(user_id = %user_id, "[CHAT] Chat error: {}", e);
                AppError::Internal(e.to_string())
            })?;

        info!(user_id = %user_id, has_audio = audio_url.is_some(), "[CHAT] Reply delivered");

        Ok(ChatResponse {
            text,
            user_id,
            timestamp,
            audio_url,
        })
    }

    /// Stored history for a user. Unknown users get an empty history.
    #[instrument(skip(self))]
    pub async fn get_history(&self, user_id: &str) -> Result<HistoryData> {
        let history = self.history.get(user_id).await?;

        Ok(HistoryData {
            user_id: user_id.to_string(),
            total_messages: history.len(),
            history,
        })
    }

    /// Canned questions offered by the chat page.
    pub fn questions() -> Vec<QuestionAnswer> {
        [
            ("Привет", "Здравствуйте! Чем могу помочь?"),
            ("Как дела?", "Всё отлично, спасибо! А у вас?"),
            ("Что ты умеешь?", "Я могу общаться с вами и отвечать на вопросы."),
        ]
        .into_iter()
        .map(|(question, answer)| QuestionAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect()
    }
}

/// Trim and check a message. Returns the trimmed text.
pub fn validate_message(message: &str) -> Result<&str> {
    let message = message.trim();
    validate_not_empty(message, "message")
        .and_then(|_| validate_max_chars(message, MAX_MESSAGE_CHARS, "message"))
        .map_err(AppError::Validation)?;
    Ok(message)
}

// endregion: --- Tests

//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all gateway modules. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`Validation`](AppError::Validation) → 422 Unprocessable Entity
//!
//! 2. **Upstream Errors** (AI service)
//!    - [`UpstreamUnavailable`](AppError::UpstreamUnavailable) → 503, with a fallback text
//!    - [`Upstream`](AppError::Upstream) → 500, service message passed through
//!
//! 3. **Server Errors** (5xx)
//!    - [`Cache`](AppError::Cache) → 500, raw storage message passed through
//!    - [`Config`](AppError::Config) / [`Internal`](AppError::Internal) → 500, generic message
//!
//! Every variant renders the same JSON envelope:
//!
//! ```text
//! { "success": false, "error": "...", "fallback_text": "..." }
//! ```
//!
//! `fallback_text` is only present for [`UpstreamUnavailable`](AppError::UpstreamUnavailable).

use crate::dto::ErrorResponse;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// User-facing text shown when the AI service cannot be reached.
pub const FALLBACK_TEXT: &str = "Извините, сервис временно недоступен.";

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed chat request, rejected before any downstream call.
    ///
    /// **HTTP Status**: 422 Unprocessable Entity
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport failure, timeout, or HTTP-level failure talking to the AI service.
    ///
    /// **HTTP Status**: 503 Service Unavailable
    #[error("AI service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The AI service answered but reported a failure.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("AI service error: {0}")]
    Upstream(String),

    /// History store unreachable or holding an unreadable payload.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("{0}")]
    Cache(String),

    /// Configuration error during startup or environment loading.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_)
            | AppError::Cache(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message returned to the browser.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::UpstreamUnavailable(_) => "AI service unavailable".to_string(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::Cache(msg) => msg.clone(),
            AppError::Config(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Fixed fallback text, only for upstream outages.
    pub fn fallback_text(&self) -> Option<String> {
        match self {
            AppError::UpstreamUnavailable(_) => Some(FALLBACK_TEXT.to_string()),
            _ => None,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.user_message(),
            fallback_text: self.fallback_text(),
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full error message for server logs
        if status.is_client_error() {
            tracing::debug!("Client error: {}", self);
        } else {
            tracing::error!("Server error: {}", self);
        }

        (status, Json(self.to_response_body())).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
///
/// The driver's message is kept verbatim; it reaches the browser as-is.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => AppError::Cache(db_err.message().to_string()),
            _ => AppError::Cache(err.to_string()),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
///
/// JSON only crosses the cache boundary inside this crate, so a decoding failure
/// means a stored payload is unreadable.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Cache(format!("Cached payload is not valid JSON: {}", err))
    }
}

// endregion: --- Tests

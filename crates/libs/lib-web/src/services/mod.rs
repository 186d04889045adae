//! # Services Layer
//!
//! Business logic services sitting between the HTTP handlers and the outside world
//! (the AI service and the history cache):
//!
//! ```text
//! Handlers (HTTP) → ChatService → AiServiceClient (HTTP)
//!                               → HistoryCache → CacheStore
//! ```
//!
//! ## Module Organization
//!
//! - [`ai_client`] - outbound calls to the AI inference service
//! - [`chat`] - validation, orchestration and response shaping for chat messages
//!
//! ## Error Handling
//!
//! All services return `Result<T, AppError>` where `AppError` is the centralized
//! error type from `lib_core::error`.

pub mod ai_client;
pub mod chat;

// Re-export services for convenience
pub use ai_client::AiServiceClient;
pub use chat::ChatService;

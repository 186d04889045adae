//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature. Handlers stay thin and delegate to
//! [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`chat`]**: chat API
//!   - `POST /api/chat/send` - Send a message to the AI service
//!   - `GET /api/chat/questions` - Canned questions
//!   - `GET /api/chat/history/{user_id}` - Stored history
//!
//! - **[`page`]**: browser page
//!   - `GET /`, `GET /chat` - Chat page
//!
//! - **[`health`]**: probes
//!   - `GET /health` - Gateway and AI service status
//!
//! ## Error Handling
//!
//! Fallible handlers return `Result<Json<T>, AppError>`. `AppError` renders the
//! `{ success: false, error, fallback_text? }` envelope with the matching status.

pub mod chat;
pub mod health;
pub mod page;

//! # Core Library
//!
//! Core models, cache storage, configuration, and errors for the chat gateway.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::{CacheDriver, Config};
pub use error::{AppError, Result, FALLBACK_TEXT};
pub use model::history::HistoryCache;
pub use model::store::{CacheStore, DbPool, MemoryStore, SqliteStore, create_pool};

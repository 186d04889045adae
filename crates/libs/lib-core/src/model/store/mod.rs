//! # Cache Store
//!
//! Key/value storage with per-entry expiration, and its drivers.
//!
//! The chat history is the only thing stored here. Values are opaque strings
//! (JSON documents written by [`HistoryCache`](crate::model::history::HistoryCache)).
//!
//! ## Drivers
//!
//! - [`MemoryStore`]: process-local map, lost on restart
//! - [`SqliteStore`]: `cache` table in a SQLite database
//!
//! Stores do not coordinate concurrent read-modify-write cycles. Two writers to
//! the same key race and the last `put` wins.

// region: --- Modules
pub mod memory;
pub mod sqlite;
// endregion: --- Modules

// region: --- Re-exports
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::time::Duration;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool for the given URL.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Key/value store with time-to-live semantics.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Driver name, for logs
    fn name(&self) -> &'static str;

    /// Fetch a value. Missing and expired entries both yield `None`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one. The entry expires `ttl` from now.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}
// endregion: --- Types and Functions

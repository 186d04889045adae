//! # SQLite Cache Store
//!
//! [`CacheStore`] backed by a single `cache` table:
//!
//! ```text
//! key TEXT PRIMARY KEY | value TEXT | expiration INTEGER (unix millis)
//! ```
//!
//! Expired rows are filtered out on read and overwritten in place on write.
//! [`SqliteStore::purge_expired`] deletes them in bulk.

use super::{CacheStore, DbPool};
use crate::error::Result;
use async_trait::async_trait;
use lib_utils::now_utc;
use std::time::Duration;
use tracing::{debug, info};

const CREATE_CACHE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cache (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        expiration INTEGER NOT NULL
    )
"#;

/// SQLite-backed [`CacheStore`].
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Wrap a pool and make sure the `cache` table exists.
    pub async fn new(pool: DbPool) -> Result<Self> {
        sqlx::query(CREATE_CACHE_TABLE).execute(&pool).await?;
        info!("[CACHE] SQLite cache table ready");
        Ok(Self { pool })
    }

    /// Delete every expired row. Returns the number of rows removed.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cache WHERE expiration <= ?")
            .bind(now_millis())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn now_millis() -> i64 {
    now_utc().timestamp_millis()
}

#[async_trait]
impl CacheStore for SqliteStore {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT value FROM cache WHERE key = ? AND expiration > ?",
        )
        .bind(key)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;

        if row.is_none() {
            debug!("[CACHE] Miss: {}", key);
        }
        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expiration = now_millis().saturating_add(ttl_millis);

        sqlx::query(
            r#"
            INSERT INTO cache (key, value, expiration) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, expiration = excluded.expiration
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(expiration)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// endregion: --- Tests

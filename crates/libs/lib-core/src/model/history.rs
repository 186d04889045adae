//! # History Cache
//!
//! Bounded, expiring per-user chat history stored in a [`CacheStore`].
//!
//! Each user owns one entry under `chat_history_{user_id}` holding a JSON array of
//! [`ChatMessageRecord`], oldest first. Every append rewrites the whole entry and
//! resets its TTL, so a history lives for `ttl` after its most recent write.
//!
//! ## Concurrency
//!
//! [`HistoryCache::append`] is a plain read-modify-write. Two concurrent appends
//! for the same user can both read the same snapshot; the later write wins and
//! the other record is lost. Callers accept this.

use crate::dto::ChatMessageRecord;
use crate::error::Result;
use crate::model::store::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Cache key for a user's history.
pub fn history_key(user_id: &str) -> String {
    format!("chat_history_{}", user_id)
}

pub struct HistoryCache {
    store: Arc<dyn CacheStore>,
    limit: usize,
    ttl: Duration,
}

impl HistoryCache {
    pub fn new(store: Arc<dyn CacheStore>, limit: usize, ttl: Duration) -> Self {
        Self { store, limit, ttl }
    }

    /// History for `user_id`, oldest first. Empty when absent or expired.
    pub async fn get(&self, user_id: &str) -> Result<Vec<ChatMessageRecord>> {
        match self.store.get(&history_key(user_id)).await? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a record, keep only the newest `limit` entries, and reset the TTL.
    pub async fn append(&self, user_id: &str, record: ChatMessageRecord) -> Result<()> {
        let mut history = self.get(user_id).await?;
        history.push(record);

        if history.len() > self.limit {
            let overflow = history.len() - self.limit;
            history.drain(..overflow);
        }

        debug!(
            user_id = %user_id,
            total = history.len(),
            store = self.store.name(),
            "[HISTORY] Saving history"
        );

        let payload = serde_json::to_string(&history)?;
        self.store.put(&history_key(user_id), payload, self.ttl).await
    }
}

// endregion: --- Tests

//! Durable failed-attempt counter
//!
//! The count lives in a [`KeyValueStore`] so it survives restarts. Every
//! change is written to the store before the in-memory copy is updated,
//! so a value reported by [`RetryCounter::count`] has always been persisted.

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::KeyValueStore;

/// Storage key for the retry count
pub const RETRY_COUNT_KEY: &str = "pingate.retry_count";

/// Failed-attempt counter backed by a key-value store
pub struct RetryCounter<K> {
    store: K,
    key: String,
    count: u32,
}

impl<K: KeyValueStore> RetryCounter<K> {
    /// Create a counter using the default key. Call [`load`](Self::load)
    /// before trusting [`count`](Self::count).
    pub fn new(store: K) -> Self {
        Self::with_key(store, RETRY_COUNT_KEY)
    }

    /// Create a counter under a custom key
    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            count: 0,
        }
    }

    /// Last loaded or written count
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Read the persisted count. Absent or unparsable values read as 0.
    pub async fn load(&mut self) -> Result<u32> {
        self.count = self.read_persisted().await?;
        Ok(self.count)
    }

    /// Persisted count + 1, written back before returning
    pub async fn increment(&mut self) -> Result<u32> {
        let next = self.read_persisted().await?.saturating_add(1);
        self.store.set(&self.key, &next.to_string()).await?;
        self.count = next;
        debug!(count = next, "Retry count incremented");
        Ok(next)
    }

    /// Write 0
    pub async fn reset(&mut self) -> Result<()> {
        self.store.set(&self.key, "0").await?;
        self.count = 0;
        Ok(())
    }

    /// Drop the stored value entirely; it reads as 0 afterwards
    pub async fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key).await?;
        self.count = 0;
        debug!("Retry count cleared");
        Ok(())
    }

    async fn read_persisted(&self) -> Result<u32> {
        let value = self.store.get(&self.key).await?;
        Ok(match value {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                warn!(key = %self.key, "Ignoring unparsable retry count: {}", e);
                0
            }),
            None => 0,
        })
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use super::errors::StorageError;
use super::types::{CacheData, CacheStore};

const CACHE_PREFIX: &str = "cache";

struct CacheEntry {
    data: CacheData,
    expires_at: DateTime<Utc>,
}

/// Process-local cache store. Entries vanish with the process.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entry: HashMap<String, CacheEntry>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory cache store");
        Self::default()
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: u64,
    ) -> Result<(), StorageError> {
        let now = Utc::now();
        let expires_at = i64::try_from(ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| StorageError::Storage(format!("TTL out of range: {ttl}")))?;

        // Abandoned entries are never read again, so drop them on write.
        self.entry.retain(|_, entry| entry.expires_at > now);

        let key = Self::make_key(prefix, key);
        self.entry.insert(
            key,
            CacheEntry {
                data: value,
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        Ok(self
            .entry
            .get(&key)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.data.clone()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}

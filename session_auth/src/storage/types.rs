use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::StorageError;

/// Data stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheData {
    pub value: String,
}

/// Key/value backend holding session records
///
/// Keys are namespaced by `prefix`. Implementations must not hand back an
/// entry whose TTL has elapsed.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Put an entry into the store with a TTL in seconds.
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: u64,
    ) -> Result<(), StorageError>;

    /// Get an entry from the store.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError>;

    /// Remove an entry from the store. Removing a missing key is not an error.
    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError>;
}

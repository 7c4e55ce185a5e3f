//! Test utilities shared across the unit tests of this crate
//!
//! Provides request header builders and store doubles that fail on demand,
//! so that error paths can be exercised without a real backend.

use async_trait::async_trait;
use http::HeaderMap;
use http::header::COOKIE;

use crate::storage::{CacheData, CacheStore, StorageError};

/// Request headers carrying a single cookie
pub(crate) fn cookie_headers(name: &str, value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        format!("{name}={value}")
            .parse()
            .expect("Failed to build cookie header"),
    );
    headers
}

/// Cache store whose every operation fails
pub(crate) struct FailingCacheStore;

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn put_with_ttl(
        &mut self,
        _prefix: &str,
        _key: &str,
        _value: CacheData,
        _ttl: u64,
    ) -> Result<(), StorageError> {
        Err(StorageError::Storage("store unavailable".to_string()))
    }

    async fn get(&self, _prefix: &str, _key: &str) -> Result<Option<CacheData>, StorageError> {
        Err(StorageError::Storage("store unavailable".to_string()))
    }

    async fn remove(&mut self, _prefix: &str, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Storage("store unavailable".to_string()))
    }
}

/// Cache store that behaves normally until removal, which always fails
#[derive(Default)]
pub(crate) struct UndeletableCacheStore {
    inner: crate::storage::InMemoryCacheStore,
}

#[async_trait]
impl CacheStore for UndeletableCacheStore {
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: u64,
    ) -> Result<(), StorageError> {
        self.inner.put_with_ttl(prefix, key, value, ttl).await
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        self.inner.get(prefix, key).await
    }

    async fn remove(&mut self, _prefix: &str, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Storage("remove rejected".to_string()))
    }
}

/// Cache store that accepts writes but fails every read
#[derive(Default)]
pub(crate) struct UnreadableCacheStore {
    inner: crate::storage::InMemoryCacheStore,
}

#[async_trait]
impl CacheStore for UnreadableCacheStore {
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: u64,
    ) -> Result<(), StorageError> {
        self.inner.put_with_ttl(prefix, key, value, ttl).await
    }

    async fn get(&self, _prefix: &str, _key: &str) -> Result<Option<CacheData>, StorageError> {
        Err(StorageError::Storage("read rejected".to_string()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        self.inner.remove(prefix, key).await
    }
}

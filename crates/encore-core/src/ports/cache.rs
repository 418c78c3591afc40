use async_trait::async_trait;
use std::time::Duration;

/// Cache trait - abstraction over side-cache backends (Redis, in-memory).
///
/// The cache is advisory: a `get` miss and an unreachable backend look the
/// same to callers, and neither is an error.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache. Backend faults are reported as a miss.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value in the cache with optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

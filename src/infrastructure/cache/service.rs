//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// Never fatal: callers log them and fall back to the durable store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    ConnectionError(String),

    #[error("cache operation error: {0}")]
    OperationError(String),

    #[error("cache operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Non-authoritative accelerator for short code lookups.
///
/// Only positive resolutions are cached. Absence of a key never means the
/// code does not exist; entries may be evicted at any time by the backend.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - Always-miss implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend is unreachable or too slow.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping without expiry. Eviction is left to the backend's
    /// memory policy. Concurrent writes of the same key carry the same value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write could not be performed.
    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}

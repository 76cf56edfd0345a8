//! Repository trait for short code mappings.

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};
use crate::error::StoreError;
use async_trait::async_trait;

/// Durable, authoritative store of short code mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Atomically inserts a new mapping.
    ///
    /// The store's uniqueness constraint on the short code is the only arbiter
    /// of success; callers must not check for existence beforehand.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the short code is taken.
    /// Returns [`StoreError::Unavailable`] on any other database failure.
    async fn insert(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, StoreError>;

    /// Looks up the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code exists
    /// - `Ok(None)` if it was never allocated
    async fn find_original_url(&self, short_code: &str) -> Result<Option<String>, StoreError>;

    /// Lists every mapping, newest first.
    async fn list_all(&self) -> Result<Vec<ShortenedUrl>, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

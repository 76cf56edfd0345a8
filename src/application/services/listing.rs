//! Listing of stored mappings.

use std::sync::Arc;

use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::StoreError;

/// Read-only view over every stored mapping. Always served by the store.
pub struct UrlListing {
    urls: Arc<dyn UrlRepository>,
}

impl UrlListing {
    pub fn new(urls: Arc<dyn UrlRepository>) -> Self {
        Self { urls }
    }

    /// Returns every mapping, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be queried.
    pub async fn list_all(&self) -> Result<Vec<ShortenedUrl>, StoreError> {
        self.urls.list_all().await
    }

    /// Verifies the store is reachable.
    pub async fn check_store(&self) -> Result<(), StoreError> {
        self.urls.ping().await
    }
}

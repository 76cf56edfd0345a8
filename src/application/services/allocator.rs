//! Short code allocation.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::application::metrics::{CacheOperation, RedirectMetrics};
use crate::domain::entities::NewShortenedUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::{ShortenError, StoreError};
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::ShortCodeGenerator;

/// Retries after the first attempt; attempts are numbered `0..=MAX_RETRIES`.
pub const MAX_RETRIES: u32 = 3;

/// Allocates unique short codes for original URLs.
///
/// Uses attempt-and-detect-conflict: each candidate is inserted directly and
/// the store's uniqueness constraint decides the winner. There is no
/// existence pre-check, since check-then-insert races under concurrent
/// allocators. The allocator holds no locks and no per-call state.
pub struct Allocator {
    urls: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    metrics: Arc<dyn RedirectMetrics>,
    generator: ShortCodeGenerator,
}

impl Allocator {
    /// Creates an allocator with the default 10-character, 62-symbol generator.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<dyn RedirectMetrics>,
    ) -> Self {
        Self::with_generator(urls, cache, metrics, ShortCodeGenerator::default())
    }

    /// Creates an allocator with a custom code generator.
    pub fn with_generator(
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<dyn RedirectMetrics>,
        generator: ShortCodeGenerator,
    ) -> Self {
        Self {
            urls,
            cache,
            metrics,
            generator,
        }
    }

    /// Stores `original_url` under a freshly allocated short code and returns the code.
    ///
    /// On a uniqueness conflict the candidate is discarded and a new one is
    /// generated, up to [`MAX_RETRIES`] times. On success the mapping is written
    /// to the cache without a TTL; a cache failure is logged and counted but
    /// does not fail the allocation.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::AllocationExhausted`] after `MAX_RETRIES + 1`
    /// conflicting attempts.
    /// Returns [`ShortenError::StoreUnavailable`] on any other store failure; it
    /// is not retried here.
    pub async fn shorten(&self, original_url: &str) -> Result<String, ShortenError> {
        for attempt in 0..=MAX_RETRIES {
            let new_url = NewShortenedUrl {
                short_code: self.generator.generate(),
                original_url: original_url.to_string(),
            };

            match self.urls.insert(new_url).await {
                Ok(created) => {
                    debug!(short_code = %created.short_code, attempt, "Short code allocated");
                    self.populate_cache(&created.short_code, &created.original_url)
                        .await;
                    return Ok(created.short_code);
                }
                Err(StoreError::UniqueViolation { constraint }) => {
                    if attempt < MAX_RETRIES {
                        warn!(
                            attempt = attempt + 1,
                            max_retries = MAX_RETRIES,
                            constraint = constraint.as_deref().unwrap_or("unknown"),
                            "Short code collision occurred, retrying"
                        );
                    }
                }
                Err(e) => return Err(ShortenError::StoreUnavailable(e)),
            }
        }

        let attempts = MAX_RETRIES + 1;
        error!(
            attempts,
            max_retries = MAX_RETRIES,
            "Failed to generate unique short code"
        );

        Err(ShortenError::AllocationExhausted { attempts })
    }

    async fn populate_cache(&self, short_code: &str, original_url: &str) {
        if let Err(e) = self.cache.set_url(short_code, original_url).await {
            warn!(short_code, error = %e, "Failed to cache new short code");
            self.metrics.cache_error(CacheOperation::Set);
        }
    }
}

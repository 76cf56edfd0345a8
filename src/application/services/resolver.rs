//! Short code resolution (cache-aside read path).

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::application::metrics::{CacheOperation, RedirectMetrics};
use crate::domain::repositories::UrlRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::ResolveError;
use crate::infrastructure::cache::CacheService;

/// Client metadata attached to a redirect, copied into the visit record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl RequestContext {
    pub fn new(user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            user_agent: user_agent.map(str::to_string),
            referer: referer.map(str::to_string),
        }
    }
}

/// Resolves short codes to original URLs.
///
/// # Read Path
///
/// 1. Cache lookup; a hit is returned without touching the store
/// 2. On miss, store lookup; a found URL is written back to the cache
/// 3. Not-found results are never cached
///
/// Concurrent misses on the same code may each query the store and write the
/// same value back. Mappings are immutable, so the redundant writes converge
/// and no per-key locking is needed.
///
/// # Side Effects
///
/// Every successful resolution queues a [`VisitEvent`] without waiting for it
/// to be persisted and increments the success counter; a miss increments the
/// failure counter only.
pub struct Resolver {
    urls: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    metrics: Arc<dyn RedirectMetrics>,
    visits: mpsc::Sender<VisitEvent>,
}

impl Resolver {
    /// Creates a new resolver.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<dyn RedirectMetrics>,
        visits: mpsc::Sender<VisitEvent>,
    ) -> Self {
        Self {
            urls,
            cache,
            metrics,
            visits,
        }
    }

    /// Resolves `short_code` to its original URL.
    ///
    /// Cache failures degrade to a miss and are logged at warning level.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code exists
    /// - `Ok(None)` if it was never allocated
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::StoreUnavailable`] if the store fails on a cache miss.
    /// No retry is attempted.
    pub async fn resolve(
        &self,
        short_code: &str,
        context: &RequestContext,
    ) -> Result<Option<String>, ResolveError> {
        let resolved = match self.cached(short_code).await {
            Some(url) => Some(url),
            None => self.load_and_populate(short_code).await?,
        };

        match &resolved {
            Some(_) => {
                self.record_visit(short_code, context);
                self.metrics.redirect_succeeded(short_code);
            }
            None => {
                debug!(short_code, "Short code not found");
                self.metrics.redirect_failed(short_code);
            }
        }

        Ok(resolved)
    }

    /// Whether the visit queue still has a live consumer.
    pub fn visit_queue_open(&self) -> bool {
        !self.visits.is_closed()
    }

    /// Free slots left in the visit queue.
    pub fn visit_queue_capacity(&self) -> usize {
        self.visits.capacity()
    }

    async fn cached(&self, short_code: &str) -> Option<String> {
        match self.cache.get_url(short_code).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(short_code, error = %e, "Cache lookup failed, falling back to store");
                self.metrics.cache_error(CacheOperation::Get);
                None
            }
        }
    }

    async fn load_and_populate(&self, short_code: &str) -> Result<Option<String>, ResolveError> {
        let original_url = self
            .urls
            .find_original_url(short_code)
            .await
            .map_err(ResolveError::StoreUnavailable)?;

        if let Some(url) = &original_url
            && let Err(e) = self.cache.set_url(short_code, url).await
        {
            warn!(short_code, error = %e, "Failed to populate cache after store hit");
            self.metrics.cache_error(CacheOperation::Set);
        }

        Ok(original_url)
    }

    fn record_visit(&self, short_code: &str, context: &RequestContext) {
        let event = VisitEvent::new(
            short_code.to_string(),
            context.user_agent.as_deref(),
            context.referer.as_deref(),
        );

        match self.visits.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(short_code = %event.short_code, "Visit queue full, dropping visit");
                self.metrics.visit_dropped(short_code);
            }
            Err(TrySendError::Closed(event)) => {
                error!(short_code = %event.short_code, "Visit queue closed, dropping visit");
                self.metrics.visit_dropped(short_code);
            }
        }
    }
}

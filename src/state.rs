//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::metrics::RedirectMetrics;
use crate::application::services::{Allocator, Resolver, UrlListing};
use crate::domain::repositories::UrlRepository;
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<Allocator>,
    pub resolver: Arc<Resolver>,
    pub listing: Arc<UrlListing>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the allocator, resolver and listing around shared store, cache and metrics handles.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<dyn RedirectMetrics>,
        visit_sender: mpsc::Sender<VisitEvent>,
    ) -> Self {
        let allocator = Allocator::new(urls.clone(), cache.clone(), metrics.clone());
        Self::with_allocator(allocator, urls, cache, metrics, visit_sender)
    }

    /// Same as [`AppState::new`] with a preconfigured allocator (e.g. a narrowed code generator).
    pub fn with_allocator(
        allocator: Allocator,
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<dyn RedirectMetrics>,
        visit_sender: mpsc::Sender<VisitEvent>,
    ) -> Self {
        let resolver = Resolver::new(urls.clone(), cache.clone(), metrics, visit_sender);

        Self {
            allocator: Arc::new(allocator),
            resolver: Arc::new(resolver),
            listing: Arc::new(UrlListing::new(urls)),
            cache,
        }
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use snaplink::application::metrics::{CacheOperation, RedirectMetrics};
use snaplink::domain::entities::{NewShortenedUrl, NewVisit, ShortenedUrl, Visit};
use snaplink::domain::repositories::{UrlRepository, VisitRepository};
use snaplink::domain::visit_event::VisitEvent;
use snaplink::domain::visit_worker::run_visit_worker;
use snaplink::error::StoreError;
use snaplink::infrastructure::cache::{CacheError, CacheResult, CacheService};
use snaplink::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Store double with a real uniqueness constraint on the short code.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<HashMap<String, ShortenedUrl>>,
    insert_attempts: AtomicUsize,
    lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, short_code: &str, original_url: &str) {
        self.rows.lock().unwrap().insert(
            short_code.to_string(),
            ShortenedUrl::new(short_code.to_string(), original_url.to_string(), Utc::now()),
        );
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, StoreError> {
        tokio::task::yield_now().await;
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&new_url.short_code) {
            return Err(StoreError::UniqueViolation {
                constraint: Some("shortened_url_short_code_key".to_string()),
            });
        }

        let created = ShortenedUrl::new(new_url.short_code, new_url.original_url, Utc::now());
        rows.insert(created.short_code.clone(), created.clone());
        Ok(created)
    }

    async fn find_original_url(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        tokio::task::yield_now().await;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(short_code)
            .map(|row| row.original_url.clone()))
    }

    async fn list_all(&self) -> Result<Vec<ShortenedUrl>, StoreError> {
        self.check_available()?;

        let mut all: Vec<ShortenedUrl> = self.rows.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[derive(Default)]
pub struct InMemoryVisitRepository {
    visits: Mutex<Vec<Visit>>,
}

impl InMemoryVisitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits_for(&self, short_code: &str) -> Vec<Visit> {
        self.visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.short_code == short_code)
            .cloned()
            .collect()
    }

    pub fn total(&self) -> usize {
        self.visits.lock().unwrap().len()
    }
}

#[async_trait]
impl VisitRepository for InMemoryVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, StoreError> {
        let mut visits = self.visits.lock().unwrap();
        let visit = Visit::new(
            visits.len() as i32 + 1,
            new_visit.short_code,
            Utc::now(),
            new_visit.user_agent,
            new_visit.referer,
        );
        visits.push(visit.clone());
        Ok(visit)
    }

    async fn count_for_code(&self, short_code: &str) -> Result<i64, StoreError> {
        Ok(self.visits_for(short_code).len() as i64)
    }
}

/// Cache double that can be switched into an outage.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    down: AtomicBool,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down() -> Self {
        let cache = Self::default();
        cache.set_down(true);
        cache
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn get(&self, short_code: &str) -> Option<String> {
        self.entries.lock().unwrap().get(short_code).cloned()
    }

    pub fn evict(&self, short_code: &str) {
        self.entries.lock().unwrap().remove(short_code);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        Ok(self.get(short_code))
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.down.load(Ordering::SeqCst)
    }
}

/// Metrics double recording exact per-code counts.
#[derive(Default)]
pub struct CountingMetrics {
    succeeded: Mutex<HashMap<String, u64>>,
    failed: Mutex<HashMap<String, u64>>,
    cache_errors: Mutex<HashMap<CacheOperation, u64>>,
    dropped: Mutex<HashMap<String, u64>>,
}

impl CountingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeeded(&self, short_code: &str) -> u64 {
        self.succeeded.lock().unwrap().get(short_code).copied().unwrap_or(0)
    }

    pub fn failed(&self, short_code: &str) -> u64 {
        self.failed.lock().unwrap().get(short_code).copied().unwrap_or(0)
    }

    pub fn cache_errors(&self, operation: CacheOperation) -> u64 {
        self.cache_errors
            .lock()
            .unwrap()
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    pub fn dropped(&self, short_code: &str) -> u64 {
        self.dropped.lock().unwrap().get(short_code).copied().unwrap_or(0)
    }
}

impl RedirectMetrics for CountingMetrics {
    fn redirect_succeeded(&self, short_code: &str) {
        *self
            .succeeded
            .lock()
            .unwrap()
            .entry(short_code.to_string())
            .or_default() += 1;
    }

    fn redirect_failed(&self, short_code: &str) {
        *self
            .failed
            .lock()
            .unwrap()
            .entry(short_code.to_string())
            .or_default() += 1;
    }

    fn cache_error(&self, operation: CacheOperation) {
        *self.cache_errors.lock().unwrap().entry(operation).or_default() += 1;
    }

    fn visit_dropped(&self, short_code: &str) {
        *self
            .dropped
            .lock()
            .unwrap()
            .entry(short_code.to_string())
            .or_default() += 1;
    }
}

/// Everything a test needs to drive the services and inspect side effects.
pub struct TestHarness {
    pub state: AppState,
    pub urls: Arc<InMemoryUrlRepository>,
    pub visits: Arc<InMemoryVisitRepository>,
    pub cache: Arc<InMemoryCache>,
    pub metrics: Arc<CountingMetrics>,
    pub worker: JoinHandle<()>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_cache(InMemoryCache::new())
    }

    pub fn with_cache(cache: InMemoryCache) -> Self {
        let urls = Arc::new(InMemoryUrlRepository::new());
        let visits = Arc::new(InMemoryVisitRepository::new());
        let cache = Arc::new(cache);
        let metrics = Arc::new(CountingMetrics::new());

        let (tx, rx) = mpsc::channel::<VisitEvent>(1_000);
        let worker = tokio::spawn(run_visit_worker(rx, visits.clone(), 4));

        let state = AppState::new(urls.clone(), cache.clone(), metrics.clone(), tx);

        Self {
            state,
            urls,
            visits,
            cache,
            metrics,
            worker,
        }
    }

    /// Waits until `count` visits exist for `short_code`, or panics after a second.
    pub async fn wait_for_visits(&self, short_code: &str, count: usize) -> Vec<Visit> {
        for _ in 0..100 {
            let visits = self.visits.visits_for(short_code);
            if visits.len() >= count {
                return visits;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {} visits for {}, found {}",
            count,
            short_code,
            self.visits.visits_for(short_code).len()
        );
    }
}

/// Router with every handler mounted, without the tracing and path layers.
pub fn test_router(state: AppState) -> axum::Router {
    use axum::routing::{get, post};
    use snaplink::api::handlers::{
        health_handler, list_urls_handler, redirect_handler, shorten_handler,
    };

    axum::Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
}

mod common;

use common::{InMemoryCache, TestHarness};
use snaplink::application::metrics::CacheOperation;
use snaplink::application::services::RequestContext;
use snaplink::error::ResolveError;
use std::time::Duration;

#[tokio::test]
async fn test_unknown_code_resolves_to_none() {
    let harness = TestHarness::new();

    let resolved = harness
        .state
        .resolver
        .resolve("neverissued", &RequestContext::default())
        .await
        .unwrap();

    assert!(resolved.is_none());
    assert_eq!(harness.metrics.failed("neverissued"), 1);
    assert_eq!(harness.metrics.succeeded("neverissued"), 0);
}

#[tokio::test]
async fn test_unknown_code_is_not_cached() {
    let harness = TestHarness::new();
    let resolver = &harness.state.resolver;

    resolver
        .resolve("abcdefghij", &RequestContext::default())
        .await
        .unwrap();
    assert!(harness.cache.get("abcdefghij").is_none());

    // A mapping created after the miss must be visible immediately.
    harness.urls.seed("abcdefghij", "https://example.com/late");
    let resolved = resolver
        .resolve("abcdefghij", &RequestContext::default())
        .await
        .unwrap();

    assert_eq!(resolved.as_deref(), Some("https://example.com/late"));
}

#[tokio::test]
async fn test_miss_populates_cache_and_next_hit_skips_store() {
    let harness = TestHarness::new();
    harness.urls.seed("abcdefghij", "https://example.com/a");
    let resolver = &harness.state.resolver;

    resolver
        .resolve("abcdefghij", &RequestContext::default())
        .await
        .unwrap();
    assert_eq!(
        harness.cache.get("abcdefghij").as_deref(),
        Some("https://example.com/a")
    );

    resolver
        .resolve("abcdefghij", &RequestContext::default())
        .await
        .unwrap();
    assert_eq!(harness.urls.lookups(), 1);
}

#[tokio::test]
async fn test_cache_hit_survives_store_outage() {
    let harness = TestHarness::new();
    let code = harness
        .state
        .allocator
        .shorten("https://example.com/a")
        .await
        .unwrap();
    harness.urls.set_unavailable(true);

    let resolved = harness
        .state
        .resolver
        .resolve(&code, &RequestContext::default())
        .await
        .unwrap();

    assert_eq!(resolved.as_deref(), Some("https://example.com/a"));
}

#[tokio::test]
async fn test_store_outage_on_miss_is_an_error() {
    let harness = TestHarness::new();
    harness.urls.seed("abcdefghij", "https://example.com/a");
    harness.urls.set_unavailable(true);

    let result = harness
        .state
        .resolver
        .resolve("abcdefghij", &RequestContext::default())
        .await;

    assert!(matches!(result, Err(ResolveError::StoreUnavailable(_))));
    assert_eq!(harness.metrics.succeeded("abcdefghij"), 0);
    assert_eq!(harness.metrics.failed("abcdefghij"), 0);
}

#[tokio::test]
async fn test_cache_outage_degrades_to_store() {
    let harness = TestHarness::with_cache(InMemoryCache::down());
    harness.urls.seed("abcdefghij", "https://example.com/a");

    for _ in 0..3 {
        let resolved = harness
            .state
            .resolver
            .resolve("abcdefghij", &RequestContext::default())
            .await
            .unwrap();
        assert_eq!(resolved.as_deref(), Some("https://example.com/a"));
    }

    assert_eq!(harness.urls.lookups(), 3);
    assert_eq!(harness.metrics.cache_errors(CacheOperation::Get), 3);
    assert_eq!(harness.metrics.cache_errors(CacheOperation::Set), 3);
    assert_eq!(harness.metrics.succeeded("abcdefghij"), 3);
}

#[tokio::test]
async fn test_successful_redirect_records_visit_with_context() {
    let harness = TestHarness::new();
    let code = harness
        .state
        .allocator
        .shorten("https://example.com/a")
        .await
        .unwrap();

    let context = RequestContext::new(Some("Mozilla/5.0"), Some("https://google.com"));
    harness
        .state
        .resolver
        .resolve(&code, &context)
        .await
        .unwrap();

    let visits = harness.wait_for_visits(&code, 1).await;
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(visits[0].referer.as_deref(), Some("https://google.com"));
}

#[tokio::test]
async fn test_counters_are_exact_per_code() {
    let harness = TestHarness::new();
    let first = harness
        .state
        .allocator
        .shorten("https://example.com/1")
        .await
        .unwrap();
    let second = harness
        .state
        .allocator
        .shorten("https://example.com/2")
        .await
        .unwrap();
    let resolver = &harness.state.resolver;
    let context = RequestContext::default();

    for _ in 0..5 {
        resolver.resolve(&first, &context).await.unwrap();
    }
    resolver.resolve(&second, &context).await.unwrap();
    resolver.resolve("missing000", &context).await.unwrap();
    resolver.resolve("missing000", &context).await.unwrap();

    assert_eq!(harness.metrics.succeeded(&first), 5);
    assert_eq!(harness.metrics.succeeded(&second), 1);
    assert_eq!(harness.metrics.failed("missing000"), 2);
    assert_eq!(harness.metrics.failed(&first), 0);

    harness.wait_for_visits(&first, 5).await;
    harness.wait_for_visits(&second, 1).await;
}

#[tokio::test]
async fn test_missing_code_records_no_visit() {
    let harness = TestHarness::new();

    harness
        .state
        .resolver
        .resolve("missing000", &RequestContext::default())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(harness.visits.total(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_of_same_code() {
    let harness = TestHarness::new();
    harness.urls.seed("abcdefghij", "https://example.com/a");

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let resolver = harness.state.resolver.clone();
            tokio::spawn(async move {
                resolver
                    .resolve("abcdefghij", &RequestContext::default())
                    .await
            })
        })
        .collect();

    for handle in handles {
        let resolved = handle.await.unwrap().unwrap();
        assert_eq!(resolved.as_deref(), Some("https://example.com/a"));
    }

    assert_eq!(harness.metrics.succeeded("abcdefghij"), 100);
    assert_eq!(
        harness.cache.get("abcdefghij").as_deref(),
        Some("https://example.com/a")
    );
    harness.wait_for_visits("abcdefghij", 100).await;
}

#[tokio::test]
async fn test_visits_survive_shutdown_drain() {
    let harness = TestHarness::new();
    harness.urls.seed("abcdefghij", "https://example.com/a");

    for _ in 0..10 {
        harness
            .state
            .resolver
            .resolve("abcdefghij", &RequestContext::default())
            .await
            .unwrap();
    }

    let common::TestHarness {
        state,
        visits,
        worker,
        ..
    } = harness;
    drop(state);
    worker.await.unwrap();

    assert_eq!(visits.visits_for("abcdefghij").len(), 10);
}

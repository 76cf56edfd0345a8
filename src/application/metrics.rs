//! Redirect outcome counters.
//!
//! Services receive a [`RedirectMetrics`] handle instead of touching a global
//! registry, so tests can substitute a double and assert exact counts.

/// Cache operation that failed, used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOperation {
    Get,
    Set,
}

impl CacheOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

/// Monotonic counters describing redirect and cache outcomes.
///
/// Implementations must be safe to call concurrently from every request task.
#[cfg_attr(test, mockall::automock)]
pub trait RedirectMetrics: Send + Sync {
    /// A short code resolved to a URL.
    fn redirect_succeeded(&self, short_code: &str);

    /// A short code did not resolve.
    fn redirect_failed(&self, short_code: &str);

    /// The cache backend returned an error or timed out.
    fn cache_error(&self, operation: CacheOperation);

    /// A visit could not be queued for recording.
    fn visit_dropped(&self, short_code: &str);
}

//! `metrics` crate backed implementation of [`RedirectMetrics`].
//!
//! Counters are emitted to whatever global recorder the process installs
//! (Prometheus exporter, OTLP bridge, ...). Without a recorder they are no-ops.

use metrics::{Unit, counter, describe_counter};

use crate::application::metrics::{CacheOperation, RedirectMetrics};

pub const REDIRECTS: &str = "url_shortener.redirects";
pub const FAILED_REDIRECTS: &str = "url_shortener.failed_redirects";
pub const CACHE_ERRORS: &str = "url_shortener.cache_errors";
pub const DROPPED_VISITS: &str = "url_shortener.dropped_visits";

/// Process-wide counters reported through the `metrics` facade.
#[derive(Debug, Clone, Copy)]
pub struct MetricsRecorder;

impl MetricsRecorder {
    /// Registers counter descriptions with the installed recorder.
    pub fn new() -> Self {
        describe_counter!(REDIRECTS, Unit::Count, "The number of successful redirects");
        describe_counter!(FAILED_REDIRECTS, Unit::Count, "The number of failed redirects");
        describe_counter!(CACHE_ERRORS, Unit::Count, "Cache backend errors and timeouts");
        describe_counter!(DROPPED_VISITS, Unit::Count, "Visits that could not be queued");
        Self
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectMetrics for MetricsRecorder {
    fn redirect_succeeded(&self, short_code: &str) {
        counter!(REDIRECTS, "short_code" => short_code.to_string()).increment(1);
    }

    fn redirect_failed(&self, short_code: &str) {
        counter!(FAILED_REDIRECTS, "short_code" => short_code.to_string()).increment(1);
    }

    fn cache_error(&self, operation: CacheOperation) {
        counter!(CACHE_ERRORS, "operation" => operation.as_str()).increment(1);
    }

    fn visit_dropped(&self, short_code: &str) {
        counter!(DROPPED_VISITS, "short_code" => short_code.to_string()).increment(1);
    }
}

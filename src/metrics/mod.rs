// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, CACHE_ENTRIES, CACHE_OPERATIONS, REQUESTS_TOTAL, REQUEST_DURATION,
    UPSTREAM_CALLS, UPSTREAM_DURATION,
};

/// Helper to record gateway request metrics
pub fn record_request(endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Helper to record an upstream generation call
pub fn record_upstream_call(model: &str, outcome: &str, duration_secs: f64) {
    UPSTREAM_CALLS.with_label_values(&[model, outcome]).inc();

    UPSTREAM_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

/// Helpers to record image cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_store() {
    CACHE_OPERATIONS.with_label_values(&["store"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.set(count as f64);
}

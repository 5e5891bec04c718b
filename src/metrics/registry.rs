// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_gauge_with_registry,
    register_histogram_vec_with_registry, CounterVec, Encoder, Gauge, HistogramVec, Opts,
    Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total number of gateway requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of gateway requests"),
        &["endpoint", "status"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["endpoint"],
        REGISTRY
    ).unwrap();

    /// Total number of upstream generation calls
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_calls_total", "Total number of upstream generation calls"),
        &["model", "outcome"],
        REGISTRY
    ).unwrap();

    /// Upstream generation duration histogram (image generation runs for
    /// whole seconds, so buckets skew long)
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new(
            "upstream_duration_seconds",
            "Upstream generation call duration in seconds"
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 45.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    /// Image cache operations (hit / miss / store)
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("cache_operations_total", "Image cache operations"),
        &["operation"],
        REGISTRY
    ).unwrap();

    /// Number of images currently in the cache directory
    pub static ref CACHE_ENTRIES: Gauge = register_gauge_with_registry!(
        Opts::new("cache_entries", "Number of images in the cache directory"),
        REGISTRY
    ).unwrap();
}

/// Render all registered metrics in Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

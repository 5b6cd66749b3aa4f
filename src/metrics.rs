use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("shadow_requests_total", "Total number of extract requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "shadow_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_ERRORS: Counter = register_counter!(
        "shadow_upstream_errors_total",
        "Failed completion-provider calls"
    )
    .unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "shadow_upstream_latency_seconds",
        "Completion-provider call latency in seconds"
    )
    .unwrap();
}

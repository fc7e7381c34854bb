//! Prometheus metrics for quotation-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// HTTP request counter by route and status.
pub static HTTP_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "quotation_http_requests_total",
        "Total number of HTTP requests",
        &["route", "status"]
    )
    .expect("Failed to register http_requests_total")
});

/// Calculation counter by pricing mode.
pub static CALCULATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "quotation_calculations_total",
        "Total number of quotation total calculations",
        &["pricing_mode"] // net, vat_included
    )
    .expect("Failed to register calculations_total")
});

/// Submission payloads by outcome.
pub static SUBMISSIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "quotation_submissions_total",
        "Total number of submission payloads built",
        &["outcome"] // built, rejected
    )
    .expect("Failed to register submissions_total")
});

/// Reconciliation mismatches by direction.
pub static RECONCILIATION_MISMATCHES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "quotation_reconciliation_mismatches_total",
        "Work item groups whose quantity differs from the declared quantity",
        &["direction"]
    )
    .expect("Failed to register reconciliation_mismatches_total")
});

/// Number of work item groups per preview.
pub static GROUPS_PER_PREVIEW: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "quotation_groups_per_preview",
        "Work item groups produced per preview request",
        &["source"],
        vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]
    )
    .expect("Failed to register groups_per_preview")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&CALCULATIONS_TOTAL);
    Lazy::force(&SUBMISSIONS_TOTAL);
    Lazy::force(&RECONCILIATION_MISMATCHES_TOTAL);
    Lazy::force(&GROUPS_PER_PREVIEW);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}

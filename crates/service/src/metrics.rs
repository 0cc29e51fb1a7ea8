use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};
use tracing::warn;

// Prometheus metrics (default registry)
pub static MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "inventory_mutations_total",
        "Mutations applied to the in-memory inventory",
        &["op"]
    )
    .expect("register mutations_total")
});

pub static REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "inventory_rejections_total",
        "Mutations refused before touching the inventory",
        &["reason"]
    )
    .expect("register rejections_total")
});

pub static SAVE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "inventory_save_failures_total",
        "Saves that could not be written to disk"
    )
    .expect("register save_failures_total")
});

pub static DEGRADED_LOADS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "inventory_degraded_loads_total",
        "Loads that discarded an unreadable data file"
    )
    .expect("register degraded_loads_total")
});

pub static SAVE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "inventory_save_duration_seconds",
        "Time spent writing the data file",
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("register save_duration")
});

pub fn record_mutation(op: &str) {
    MUTATIONS_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_rejection(reason: &str) {
    REJECTIONS_TOTAL.with_label_values(&[reason]).inc();
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        warn!(error = %e, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

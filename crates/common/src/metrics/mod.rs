//! Metrics and observability utilities
//!
//! Provides Prometheus metrics for graph loads and analysis requests
//! with standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all CiteGraph metrics
pub const METRICS_PREFIX: &str = "citegraph";

/// Histogram buckets for analysis latency (in seconds)
/// Filtering and cycle detection are linear, so most calls land below 50ms
pub const ANALYSIS_BUCKETS: &[f64] = &[
    0.0005, // 0.5ms
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    5.000,  // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Graph load metrics
    describe_counter!(
        format!("{}_graph_loads_total", METRICS_PREFIX),
        Unit::Count,
        "Total graph document loads by outcome"
    );

    describe_histogram!(
        format!("{}_graph_load_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Parse, normalize and cycle-detect latency in seconds"
    );

    describe_gauge!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        Unit::Count,
        "Nodes in the current graph"
    );

    describe_gauge!(
        format!("{}_graph_edges", METRICS_PREFIX),
        Unit::Count,
        "Edges in the current graph"
    );

    describe_gauge!(
        format!("{}_graph_cycles", METRICS_PREFIX),
        Unit::Count,
        "Citation cycles found in the current graph"
    );

    // Filter metrics
    describe_counter!(
        format!("{}_filter_evaluations_total", METRICS_PREFIX),
        Unit::Count,
        "Total filter evaluations"
    );

    describe_histogram!(
        format!("{}_filter_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Filter evaluation latency in seconds"
    );

    describe_gauge!(
        format!("{}_highlighted_nodes", METRICS_PREFIX),
        Unit::Count,
        "Nodes matched by the last filter evaluation"
    );

    // Neighbor metrics
    describe_counter!(
        format!("{}_neighbor_lookups_total", METRICS_PREFIX),
        Unit::Count,
        "Total neighbor resolutions"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a successful graph load
pub fn record_graph_load(duration_secs: f64, nodes: usize, edges: usize, cycles: usize) {
    counter!(
        format!("{}_graph_loads_total", METRICS_PREFIX),
        "status" => "success"
    )
    .increment(1);

    histogram!(format!("{}_graph_load_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    gauge!(format!("{}_graph_nodes", METRICS_PREFIX)).set(nodes as f64);
    gauge!(format!("{}_graph_edges", METRICS_PREFIX)).set(edges as f64);
    gauge!(format!("{}_graph_cycles", METRICS_PREFIX)).set(cycles as f64);
}

/// Helper to record a rejected graph load
pub fn record_graph_load_failure(reason: &str) {
    counter!(
        format!("{}_graph_loads_total", METRICS_PREFIX),
        "status" => "error",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Helper to record filter metrics
pub fn record_filter(duration_secs: f64, highlighted: usize) {
    counter!(format!("{}_filter_evaluations_total", METRICS_PREFIX)).increment(1);

    histogram!(format!("{}_filter_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    gauge!(format!("{}_highlighted_nodes", METRICS_PREFIX)).set(highlighted as f64);
}

/// Helper to record neighbor lookups
pub fn record_neighbor_lookup(found: usize) {
    let outcome = if found == 0 { "empty" } else { "found" };

    counter!(
        format!("{}_neighbor_lookups_total", METRICS_PREFIX),
        "outcome" => outcome
    )
    .increment(1);
}

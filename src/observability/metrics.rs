//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlcounts_requests_total` (counter): requests by status code
//! - `urlcounts_request_duration_seconds` (histogram): handler latency
//! - `urlcounts_urls_total` (counter): distinct URLs by outcome (matched/unmatched)
//!
//! # Design Decisions
//! - Recording is a no-op until `init_metrics` installs the Prometheus recorder
//! - Labels kept low-cardinality (no hosts, no URLs)

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

use crate::matching::MatchResult;

/// Install the Prometheus recorder with its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record a finished `/urlcounts` request.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("urlcounts_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("urlcounts_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the outcome split of a successful batch.
pub fn record_result(result: &MatchResult) {
    metrics::counter!("urlcounts_urls_total", "outcome" => "matched").increment(result.matched_count as u64);
    metrics::counter!("urlcounts_urls_total", "outcome" => "unmatched")
        .increment(result.unmatched_count as u64);
}

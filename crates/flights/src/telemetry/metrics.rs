//! Request counter instruments shared across the HTTP layer.

use opentelemetry::metrics::{Counter, Meter, Unit};
use opentelemetry::KeyValue;

/// Process-wide HTTP request instruments.
///
/// Cloning is cheap; all clones share the same underlying instruments. The
/// SDK deduplicates instrument registration by name, so constructing this
/// twice from the same meter yields the same logical counter and a single
/// export stream.
#[derive(Clone)]
pub struct RequestMetrics {
    http_requests_total: Counter<u64>,
}

impl RequestMetrics {
    /// Register the request instruments on `meter`.
    pub fn new(meter: &Meter) -> Self {
        let http_requests_total = meter
            .u64_counter("http_requests_total")
            .with_description("Total number of HTTP requests")
            .with_unit(Unit::new("1"))
            .init();
        Self {
            http_requests_total,
        }
    }

    /// Count one request, partitioned by HTTP method and matched route.
    ///
    /// Safe to call concurrently from any number of in-flight requests; the
    /// add is an in-memory atomic and never blocks on export I/O.
    pub fn record_request(&self, method: &str, endpoint: &str) {
        self.http_requests_total.add(
            1,
            &[
                KeyValue::new("method", method.to_owned()),
                KeyValue::new("endpoint", endpoint.to_owned()),
            ],
        );
    }
}

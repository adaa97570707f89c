//! Shared application state injected into the instrumentation middleware.

use crate::telemetry::RequestMetrics;

/// Application state shared across all requests.
///
/// Cheaply cloneable; all clones share the same underlying instruments.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide request counter instruments.
    pub metrics: RequestMetrics,
}

impl AppState {
    /// Create a new [`AppState`] over the registered request instruments.
    pub fn new(metrics: RequestMetrics) -> Self {
        Self { metrics }
    }
}

impl Default for AppState {
    /// State backed by a no-op meter, suitable for tests.
    fn default() -> Self {
        Self::new(RequestMetrics::new(&opentelemetry::global::meter("flights")))
    }
}

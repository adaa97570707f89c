//! Per-request instrumentation applied ahead of every route.
//!
//! For each request, in order: increment the request counter (exactly once,
//! whatever the outcome), open a span named for the matched route, run the
//! downstream service inside that span, then close the span with a status
//! derived from the response and log completion. No handler path can skip
//! this layer; it is registered outermost on the router.

use std::time::Duration;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{field, info, info_span, Instrument};

use super::state::AppState;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Counter pre-hook, request span, and status post-hook for one request.
pub async fn track_request(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());

    // Pre-request hook. Counting happens before any handler code so that a
    // failing handler is still counted exactly once.
    state.metrics.record_request(method.as_str(), &endpoint);

    let span = info_span!(
        "request",
        otel.name = %endpoint,
        otel.kind = "server",
        otel.status_code = field::Empty,
        http.request.method = %method,
        http.route = %endpoint,
        error.message = field::Empty,
    );

    // The span is the active span for exactly this request's execution
    // context; concurrent requests each carry their own.
    let response = next.run(req).instrument(span.clone()).await;

    // Post-request hook: runs for success, synthetic failure, and timeout
    // alike. If the request future is dropped on client disconnect, dropping
    // the span handle still closes it.
    let status = response.status();
    if status.is_server_error() {
        span.record("otel.status_code", "ERROR");
        span.record(
            "error.message",
            format!("request failed with status {status}").as_str(),
        );
    } else {
        span.record("otel.status_code", "OK");
    }
    span.in_scope(|| info!(status = status.as_u16(), "request completed"));

    response
}

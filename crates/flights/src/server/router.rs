//! Axum router construction.

use axum::middleware::from_fn_with_state;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use super::middleware::{track_request, REQUEST_TIMEOUT};
use super::{handlers, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// The instrumentation layer is registered last so it runs outermost: the
/// counter pre-hook and span post-hook wrap every request, including
/// unmatched routes and timeouts.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/flights/:airline", get(handlers::get_flights))
        .route("/flight", post(handlers::book_flight))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(from_fn_with_state(state, track_request))
}

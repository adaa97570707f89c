//! Axum HTTP server, routing, and per-request instrumentation.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Instrument every request: counter increment, span lifecycle, completion log.
//! - Inject shared application state (`AppState`) into the instrumentation layer.

pub mod fault;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

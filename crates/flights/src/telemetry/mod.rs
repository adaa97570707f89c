//! OpenTelemetry setup: metrics, traces, and structured logs exported over OTLP.
//!
//! Every inbound HTTP request produces a correlated triad of telemetry — a
//! counter increment, a log record, and a trace span — batched and exported
//! asynchronously to the collector endpoint. Nothing in the request path
//! performs synchronous network I/O for telemetry.
//!
//! # Telemetry invariants
//!
//! - Log records emitted while a span is active carry that span's trace and
//!   span identifiers.
//! - The pipelines are initialised exactly once per process; a second
//!   [`init`] call fails instead of double-registering exporters.
//! - Export failures never propagate to request handling; they surface on
//!   stderr via the OTEL global error handler.

pub mod bridge;
pub mod init;
pub mod metrics;
pub mod resource;

pub use init::{init, Telemetry};
pub use metrics::RequestMetrics;

//! Deterministic, caller-controlled failure for pipeline validation.
//!
//! The optional `raise` query parameter names the status code the caller
//! wants the request to fail with. This is the only path in the service that
//! fails by design; it exists to prove that failed requests surface through
//! the logging and tracing pipelines (error log emitted first, span closed
//! with error status).

use common::ServiceError;
use serde::Deserialize;
use tracing::error;

/// Accepted values of the `raise` query parameter.
///
/// Domain-restricted at the boundary: anything other than `"500"` is
/// rejected during extraction instead of being interpreted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FaultTrigger {
    /// Fail the request with an internal server error.
    #[serde(rename = "500")]
    InternalError,
}

impl FaultTrigger {
    /// The HTTP status code this trigger asks the service to fail with.
    pub fn status_code(self) -> u16 {
        match self {
            FaultTrigger::InternalError => 500,
        }
    }
}

/// Raise a synthetic failure if the caller requested one.
///
/// Logs an error-level record describing the intended failure before
/// returning it, so the failure is visible in the logging pipeline even
/// though it propagates unhandled to the HTTP boundary.
pub fn maybe_inject(trigger: Option<FaultTrigger>, detail: &str) -> Result<(), ServiceError> {
    let Some(trigger) = trigger else {
        return Ok(());
    };
    let status = trigger.status_code();
    error!(status, "intentionally raising {status} error for {detail}");
    Err(ServiceError::FaultInjected { status })
}

//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::FaultInjected`] → the injected status code (500)
/// - [`ServiceError::BadRequest`] → 400
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A synthetic failure deliberately raised by the fault injector.
    ///
    /// The message mirrors the status code carried in the `raise` request
    /// parameter so that the failure is identifiable in exported logs and
    /// span events.
    #[error("encountered {status} error")]
    FaultInjected {
        /// HTTP status code the caller asked the service to fail with.
        status: u16,
    },

    /// The request was malformed — unknown airline, missing parameter, or
    /// an unsupported fault trigger value.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::FaultInjected { status } => *status,
            ServiceError::BadRequest(_) => 400,
        }
    }
}

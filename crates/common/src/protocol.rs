//! Request and response types exchanged over the public HTTP API.
//!
//! All bodies are serialised as JSON. Request parameters are modelled as
//! enums and structs so that validation happens once at the boundary instead
//! of via string lookups inside handler bodies.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Airline
// ---------------------------------------------------------------------------

/// Airline carrier codes accepted by the flight lookup endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Airline {
    /// American Airlines.
    AA,
    /// United Airlines.
    UA,
    /// Delta Air Lines.
    DL,
}

impl Airline {
    /// The carrier code as it appears in paths and response keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Airline::AA => "AA",
            Airline::UA => "UA",
            Airline::DL => "DL",
        }
    }
}

impl fmt::Display for Airline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Flight lookup
// ---------------------------------------------------------------------------

/// Successful response body for `GET /flights/:airline`.
///
/// Serialises as a single-key object mapping the carrier code to its flight
/// numbers, e.g. `{"AA": [123]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightsResponse {
    /// Flight numbers keyed by carrier code.
    #[serde(flatten)]
    pub flights: BTreeMap<String, Vec<u32>>,
}

impl FlightsResponse {
    /// Build a response holding a single flight for `airline`.
    pub fn new(airline: Airline, flight_number: u32) -> Self {
        let mut flights = BTreeMap::new();
        flights.insert(airline.as_str().to_owned(), vec![flight_number]);
        Self { flights }
    }
}

// ---------------------------------------------------------------------------
// Flight booking
// ---------------------------------------------------------------------------

/// Successful response body for `POST /flight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Passenger the flight was booked for, echoed from the request.
    pub passenger_name: String,
    /// Flight number, echoed from the request.
    pub flight_num: String,
    /// Generated booking identifier in `[100, 999]`.
    pub booking_id: u32,
}

// ---------------------------------------------------------------------------
// Health / home
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, always `"healthy"` while the process serves.
    pub status: String,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    /// Static acknowledgement message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"fault_injected"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

//! Axum request handlers for all service endpoints.
//!
//! The handlers are deliberately thin: they parse typed parameters, consult
//! the fault injector, generate a random identifier, and return JSON. Their
//! purpose is to drive the telemetry path, not to model a real airline.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::protocol::{
    Airline, BookingResponse, ErrorResponse, FlightsResponse, HealthResponse, HomeResponse,
};
use common::ServiceError;
use rand::Rng;
use serde::Deserialize;
use tracing::info;

use super::fault::{self, FaultTrigger};

/// Query parameters for `GET /flights/:airline`.
#[derive(Debug, Deserialize)]
pub struct FlightsParams {
    /// Optional synthetic-failure trigger.
    #[serde(default)]
    pub raise: Option<FaultTrigger>,
}

/// Query parameters for `POST /flight`.
#[derive(Debug, Deserialize)]
pub struct BookingParams {
    /// Passenger the flight is booked for.
    pub passenger_name: String,
    /// Flight number to book.
    pub flight_num: String,
    /// Optional synthetic-failure trigger.
    #[serde(default)]
    pub raise: Option<FaultTrigger>,
}

/// `GET /health` — liveness check.
pub async fn health() -> Response {
    info!("health check requested");
    let body = HealthResponse {
        status: "healthy".into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /` — no-op home endpoint.
pub async fn home() -> Response {
    let body = HomeResponse {
        message: "ok".into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /flights/:airline` — look up flights for a carrier.
///
/// Optionally, set `raise` to trigger a synthetic failure.
pub async fn get_flights(
    Path(airline): Path<Airline>,
    Query(params): Query<FlightsParams>,
) -> Response {
    if let Err(e) = fault::maybe_inject(params.raise, &format!("airline: {airline}")) {
        return failure_response(e);
    }

    let flight = random_three_digit();
    info!(%airline, flight, "generated flight {flight} for airline {airline}");
    (StatusCode::OK, Json(FlightsResponse::new(airline, flight))).into_response()
}

/// `POST /flight` — book a flight for a passenger.
///
/// Optionally, set `raise` to trigger a synthetic failure. Parameters are
/// parsed before the fault branch so the failure log can reference them.
pub async fn book_flight(Query(params): Query<BookingParams>) -> Response {
    let detail = format!(
        "booking flight {} for passenger {}",
        params.flight_num, params.passenger_name
    );
    if let Err(e) = fault::maybe_inject(params.raise, &detail) {
        return failure_response(e);
    }

    let booking_id = random_three_digit();
    info!(
        booking_id,
        flight_num = %params.flight_num,
        passenger_name = %params.passenger_name,
        "booked flight"
    );
    let body = BookingResponse {
        passenger_name: params.passenger_name,
        flight_num: params.flight_num,
        booking_id,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a [`ServiceError`] to its HTTP response.
///
/// Synthetic failures surface unhandled at this boundary; mapping them to a
/// 5xx response is the framework-side recovery the telemetry core assumes.
fn failure_response(err: ServiceError) -> Response {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let code = match &err {
        ServiceError::FaultInjected { .. } => "fault_injected",
        ServiceError::BadRequest(_) => "bad_request",
    };
    (status, Json(ErrorResponse::new(code, err.to_string()))).into_response()
}

fn random_three_digit() -> u32 {
    rand::thread_rng().gen_range(100..=999)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{router, state::AppState};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        router::build(AppState::default())
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_healthy() {
        let resp = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn home_returns_ok() {
        let resp = app().oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "ok");
    }

    #[tokio::test]
    async fn flights_returns_three_digit_number() {
        let resp = app().oneshot(get("/flights/AA")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let flights = body["AA"].as_array().expect("carrier key missing");
        assert_eq!(flights.len(), 1);
        let n = flights[0].as_u64().unwrap();
        assert!((100..=999).contains(&n), "flight out of range: {n}");
    }

    #[tokio::test]
    async fn flights_rejects_unknown_airline() {
        let resp = app().oneshot(get("/flights/ZZ")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn flights_raise_triggers_synthetic_failure() {
        let resp = app().oneshot(get("/flights/AA?raise=500")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "fault_injected");
        assert_eq!(body["message"], "encountered 500 error");
    }

    #[tokio::test]
    async fn flights_rejects_unsupported_raise_value() {
        let resp = app().oneshot(get("/flights/AA?raise=404")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn booking_echoes_parameters_with_generated_id() {
        let resp = app()
            .oneshot(post("/flight?passenger_name=John%20Doe&flight_num=101"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["passenger_name"], "John Doe");
        assert_eq!(body["flight_num"], "101");
        let id = body["booking_id"].as_u64().unwrap();
        assert!((100..=999).contains(&id), "booking id out of range: {id}");
    }

    #[tokio::test]
    async fn booking_raise_triggers_synthetic_failure() {
        let resp = app()
            .oneshot(post(
                "/flight?passenger_name=Jane%20Doe&flight_num=202&raise=500",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "fault_injected");
    }

    #[tokio::test]
    async fn booking_requires_parameters() {
        let resp = app().oneshot(post("/flight")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

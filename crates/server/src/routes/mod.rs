//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST   /customers                - Create a customer
//! GET    /customer                 - List every customer (full records)
//! GET    /customers/{id}           - Fetch by id
//! PUT    /customers/{id}           - Replace name, email and password
//! GET    /customers/email/{email}  - Fetch by email
//! DELETE /customers/email/{email}  - Delete by email
//!
//! GET    /health                   - Liveness
//! GET    /health/ready             - Readiness (database ping)
//! ```
//!
//! `/customers` and `/customer` each accept a single method; anything else is
//! answered with 405 by the router.

pub mod customers;
pub mod health;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response, StatusCode},
    middleware,
    routing::{get, post},
};
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the customer routes.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(customers::create))
        .route("/customer", get(customers::list))
        .route(
            "/customers/{id}",
            get(customers::show).put(customers::update),
        )
        .route(
            "/customers/email/{email}",
            get(customers::show_by_email).delete(customers::delete_by_email),
        )
}

/// Build the application router with request tracing.
///
/// With `request_timeout` set, a request still running at the deadline is
/// dropped, along with any query it is awaiting, and answered with
/// 408 Request Timeout. Sentry layers are added by the binary.
pub fn router(state: AppState, request_timeout: Option<Duration>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(customer_routes());

    if let Some(timeout) = request_timeout {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    }

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

//! Combined router for the pages and the task API

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::AppState;

/// Create the application router with HTTP request tracing
///
/// Routes:
/// - `GET /`, `GET|POST /login`, `GET /logout`
/// - `GET|POST /api/tasks`, `GET /api/tasks/html`
/// - `GET|PATCH|DELETE /api/tasks/{id}`
pub fn oz_stack_router(state: AppState) -> Router {
    oz_stack_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same routes as [`oz_stack_router`] without the tracing middleware
pub fn oz_stack_router_no_trace(state: AppState) -> Router {
    Router::new()
        .merge(super::pages::router())
        .merge(super::tasks::router())
        .with_state(state)
}

//! Router setup with Axum.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{error, Level};

use shared::http::json_response;
use shared::ErrorResponse;

use crate::handlers::{self, AppState};

/// Create the Axum router with all endpoints.
///
/// A panic while handling any request becomes a generic 500; the panic
/// payload is logged and never returned to the caller.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/create_event", post(handlers::create_event))
        .route("/update_event", post(handlers::update_event))
        .route("/delete_event", post(handlers::delete_event))
        .route("/events_for_day", get(handlers::events_for_day))
        .route("/events_for_week", get(handlers::events_for_week))
        .route("/events_for_month", get(handlers::events_for_month));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "request handler panicked");

    json_response(StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal())
}

//! Request handlers for the `/api/v1` endpoints.
//!
//! Each handler decodes its input, calls the [`CalendarService`] and wraps the
//! result in the JSON envelope. Errors render through `shared::http`.
//!
//! Bodies are decoded as JSON whatever `Content-Type` the client sends, and a
//! repeated query key keeps its first value.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use shared::{
    CalendarService, CreateEventResponse, DeleteEventRequest, Error, EventRequest, EventsQuery,
    EventsResponse, Result, ResultResponse,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: CalendarService,
}

impl AppState {
    pub fn new(service: CalendarService) -> Self {
        Self { service }
    }
}

fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejected request body");
        Error::validation("request_body", "invalid JSON format")
    })
}

type QueryPairs = std::result::Result<Query<Vec<(String, String)>>, QueryRejection>;

fn decode_query(query: QueryPairs) -> Result<EventsQuery> {
    let Query(pairs) = query.map_err(|rejection| {
        debug!(error = %rejection, "rejected query string");
        Error::validation("query", "invalid query parameters")
    })?;
    Ok(EventsQuery::from_pairs(pairs))
}

/// POST /api/v1/create_event
pub async fn create_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateEventResponse>> {
    let request: EventRequest = decode_body(&body)?;
    let id = state.service.create_event(request).await?;
    info!(event_id = %id, "event created");

    Ok(Json(CreateEventResponse {
        result: "Event created successfully".to_string(),
        id,
    }))
}

/// POST /api/v1/update_event
pub async fn update_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResultResponse>> {
    let request: EventRequest = decode_body(&body)?;
    let event_id = request.event_id.clone();
    state.service.update_event(request).await?;
    info!(event_id = %event_id, "event updated");

    Ok(Json(ResultResponse::new("Event updated successfully")))
}

/// POST /api/v1/delete_event
pub async fn delete_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResultResponse>> {
    let request: DeleteEventRequest = decode_body(&body)?;
    let event_id = request.event_id.clone();
    state.service.delete_event(request).await?;
    info!(event_id = %event_id, "event deleted");

    Ok(Json(ResultResponse::new("Event deleted successfully")))
}

/// GET /api/v1/events_for_day
pub async fn events_for_day(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<EventsResponse>> {
    let query = decode_query(query)?;
    let events = state.service.get_events_for_day(query).await?;
    Ok(Json(EventsResponse { events }))
}

/// GET /api/v1/events_for_week
pub async fn events_for_week(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<EventsResponse>> {
    let query = decode_query(query)?;
    let events = state.service.get_events_for_week(query).await?;
    Ok(Json(EventsResponse { events }))
}

/// GET /api/v1/events_for_month
pub async fn events_for_month(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<EventsResponse>> {
    let query = decode_query(query)?;
    let events = state.service.get_events_for_month(query).await?;
    Ok(Json(EventsResponse { events }))
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

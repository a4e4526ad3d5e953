//! HTTP API for the calendar event service.
//!
//! Endpoints:
//! - POST /api/v1/create_event - Create an event
//! - POST /api/v1/update_event - Overwrite an event
//! - POST /api/v1/delete_event - Delete an event
//! - GET /api/v1/events_for_day - List a user's events on one day
//! - GET /api/v1/events_for_week - List a user's events over seven days
//! - GET /api/v1/events_for_month - List a user's events over one calendar month
//! - GET /health - Liveness probe

pub mod app;
pub mod handlers;
pub mod routes;

pub use app::run;
pub use handlers::AppState;
pub use routes::create_router;

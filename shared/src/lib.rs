//! Shared library for the calendar event service.
//!
//! This crate provides configuration, the error taxonomy, domain models, and
//! the repository and service layers used by the HTTP API.

pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use http::ErrorResponse;
pub use models::{
    CreateEventResponse, DeleteEventRequest, Event, EventRequest, EventsQuery, EventsResponse,
    ResultResponse,
};
pub use repository::{EventRepository, PgEventRepository};
pub use service::CalendarService;

//! Shared data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{validate_date_format, validate_date_param};

/// A calendar entry owned by a user, dated to a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub user_id: String,
    pub event_id: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub event: String,
}

/// Create/update request payload.
///
/// Every field defaults to empty so that missing keys surface as
/// field-tagged validation errors instead of JSON decoding failures.
/// `event_id` is ignored on create and checked separately on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EventRequest {
    #[validate(length(min = 1, message = "can't be empty"))]
    pub user_id: String,
    pub event_id: String,
    #[validate(length(min = 1, message = "can't be empty"))]
    pub event: String,
    #[validate(custom(function = "validate_date_format"))]
    pub date: String,
}

/// Delete request payload. The legacy `id` key is accepted as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DeleteEventRequest {
    #[serde(alias = "id")]
    #[validate(length(min = 1, message = "event id can't be empty"))]
    pub event_id: String,
}

/// Query parameters of the day/week/month listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EventsQuery {
    #[validate(length(min = 1, message = "can't be empty"))]
    pub user_id: String,
    #[validate(custom(function = "validate_date_param"))]
    pub date: String,
}

impl EventsQuery {
    pub fn new(user_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            date: date.into(),
        }
    }

    /// Build a query from decoded `key=value` pairs. When a key repeats, the
    /// first value wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut user_id = None;
        let mut date = None;
        for (key, value) in pairs {
            match key.as_str() {
                "user_id" if user_id.is_none() => user_id = Some(value),
                "date" if date.is_none() => date = Some(value),
                _ => {}
            }
        }
        Self {
            user_id: user_id.unwrap_or_default(),
            date: date.unwrap_or_default(),
        }
    }
}

/// Create response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub result: String,
    pub id: String,
}

/// Update/delete response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

impl ResultResponse {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// Listing response payload. `events` is always present, possibly empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

//! Validation and business rules in front of the [`EventRepository`].

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::dates::parse_date;
use crate::models::{DeleteEventRequest, Event, EventRequest, EventsQuery};
use crate::repository::EventRepository;
use crate::validation::{first_failure, DATE_FORMAT_MESSAGE};
use crate::{Error, Result};

const CREATE_FIELDS: &[&str] = &["user_id", "event", "date"];
// `event` is not checked on update; an update may blank the description.
const UPDATE_FIELDS: &[&str] = &["user_id", "date"];
const QUERY_FIELDS: &[&str] = &["user_id", "date"];

/// Run the derived rules and report the first failing field of `order`.
fn check<T: Validate>(input: &T, order: &[&str]) -> Result<()> {
    match input.validate() {
        Ok(()) => Ok(()),
        Err(errors) => match first_failure(&errors, order) {
            Some(err) => {
                debug!(error = %err, "request rejected");
                Err(err)
            }
            None => Ok(()),
        },
    }
}

fn required_date(value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| Error::validation("date", DATE_FORMAT_MESSAGE))
}

/// Calendar operations as seen by the transport layer.
#[derive(Clone)]
pub struct CalendarService {
    repository: Arc<dyn EventRepository>,
}

impl CalendarService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Validate and store a new event, returning its generated id.
    ///
    /// Any `event_id` supplied by the caller is discarded.
    pub async fn create_event(&self, request: EventRequest) -> Result<String> {
        check(&request, CREATE_FIELDS)?;
        let date = required_date(&request.date)?;

        let event = Event {
            user_id: request.user_id,
            event_id: Uuid::new_v4().to_string(),
            date,
            event: request.event,
        };

        self.repository
            .create_event(&event)
            .await
            .map_err(Error::into_business)?;

        Ok(event.event_id)
    }

    /// Validate and overwrite an existing event.
    pub async fn update_event(&self, request: EventRequest) -> Result<()> {
        if request.event_id.is_empty() {
            return Err(Error::validation("event_id", "event id can't be empty"));
        }
        check(&request, UPDATE_FIELDS)?;
        let date = required_date(&request.date)?;

        let event = Event {
            user_id: request.user_id,
            event_id: request.event_id,
            date,
            event: request.event,
        };

        self.repository
            .update_event(&event)
            .await
            .map_err(Error::into_business)
    }

    /// Delete an event by id.
    pub async fn delete_event(&self, request: DeleteEventRequest) -> Result<()> {
        check(&request, &["event_id"])?;

        self.repository
            .delete_event(&request.event_id)
            .await
            .map_err(Error::into_business)
    }

    /// Events of a user on one day.
    pub async fn get_events_for_day(&self, query: EventsQuery) -> Result<Vec<Event>> {
        let date = Self::check_query(&query)?;
        self.repository
            .get_events_for_day(&query.user_id, date)
            .await
            .map_err(Error::into_business)
    }

    /// Events of a user in the seven days starting at `date`.
    pub async fn get_events_for_week(&self, query: EventsQuery) -> Result<Vec<Event>> {
        let date = Self::check_query(&query)?;
        self.repository
            .get_events_for_week(&query.user_id, date)
            .await
            .map_err(Error::into_business)
    }

    /// Events of a user in the calendar month starting at `date`.
    pub async fn get_events_for_month(&self, query: EventsQuery) -> Result<Vec<Event>> {
        let date = Self::check_query(&query)?;
        self.repository
            .get_events_for_month(&query.user_id, date)
            .await
            .map_err(Error::into_business)
    }

    fn check_query(query: &EventsQuery) -> Result<NaiveDate> {
        check(query, QUERY_FIELDS)?;
        required_date(&query.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEventRepository;

    fn service() -> CalendarService {
        CalendarService::new(Arc::new(MemoryEventRepository::default()))
    }

    fn request(user_id: &str, event: &str, date: &str) -> EventRequest {
        EventRequest {
            user_id: user_id.to_string(),
            event_id: String::new(),
            event: event.to_string(),
            date: date.to_string(),
        }
    }

    fn assert_validation(result: Result<impl std::fmt::Debug>, field: &str, message: &str) {
        match result {
            Err(Error::Validation { field: f, message: m }) => {
                assert_eq!(f, field);
                assert_eq!(m, message);
            }
            other => panic!("expected validation error on {field}, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_event_validation() {
        let srv = service();
        let cases = [
            ("valid event", request("1", "event", "2025-09-29"), None),
            ("empty user", request("", "event", "2025-09-29"), Some(("user_id", "can't be empty"))),
            ("empty event", request("1", "", "2025-09-29"), Some(("event", "can't be empty"))),
            (
                "bad date",
                request("1", "event", "2020:31:05"),
                Some(("date", "format must be YYYY-MM-DD")),
            ),
            (
                "everything empty reports user first",
                request("", "", ""),
                Some(("user_id", "can't be empty")),
            ),
        ];

        for (name, req, expected) in cases {
            let result = srv.create_event(req).await;
            match expected {
                None => assert!(result.is_ok(), "{name}: {result:?}"),
                Some((field, message)) => assert_validation(result, field, message),
            }
        }
    }

    #[tokio::test]
    async fn test_create_event_generates_unique_ids() {
        let srv = service();
        let mut supplied = request("u1", "standup", "2025-09-29");
        supplied.event_id = "client-chosen".to_string();

        let first = srv.create_event(supplied).await.unwrap();
        let second = srv
            .create_event(request("u1", "standup", "2025-09-29"))
            .await
            .unwrap();

        assert!(!first.is_empty());
        assert_ne!(first, "client-chosen");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_event_wraps_repository_failure() {
        let srv = CalendarService::new(Arc::new(MemoryEventRepository::failing("connection reset")));
        match srv.create_event(request("u1", "standup", "2025-09-29")).await {
            Err(Error::Business(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("expected business error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_event_validation() {
        let srv = service();

        let mut req = request("u1", "event", "2025-09-29");
        assert_validation(srv.update_event(req.clone()).await, "event_id", "event id can't be empty");

        req.event_id = "e1".to_string();
        req.user_id.clear();
        assert_validation(srv.update_event(req.clone()).await, "user_id", "can't be empty");

        req.user_id = "u1".to_string();
        req.date = "29-09-2025".to_string();
        assert_validation(srv.update_event(req).await, "date", "format must be YYYY-MM-DD");
    }

    #[tokio::test]
    async fn test_update_event_allows_empty_description() {
        let srv = service();
        let id = srv
            .create_event(request("u1", "standup", "2025-09-29"))
            .await
            .unwrap();

        let mut req = request("u1", "", "2025-09-30");
        req.event_id = id;
        srv.update_event(req).await.unwrap();

        let moved = srv
            .get_events_for_day(EventsQuery::new("u1", "2025-09-30"))
            .await
            .unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].event, "");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_event_is_not_found() {
        let srv = service();
        let mut req = request("u1", "event", "2025-09-29");
        req.event_id = "missing".to_string();

        assert!(matches!(srv.update_event(req).await, Err(Error::NotFound(_))));
        let delete = DeleteEventRequest {
            event_id: "missing".to_string(),
        };
        assert!(matches!(srv.delete_event(delete).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_event_validation() {
        let srv = service();
        let result = srv.delete_event(DeleteEventRequest::default()).await;
        assert_validation(result, "event_id", "event id can't be empty");
    }

    #[tokio::test]
    async fn test_delete_event_removes_it() {
        let srv = service();
        let id = srv
            .create_event(request("u1", "standup", "2025-09-29"))
            .await
            .unwrap();

        srv.delete_event(DeleteEventRequest { event_id: id.clone() })
            .await
            .unwrap();
        let again = srv.delete_event(DeleteEventRequest { event_id: id }).await;
        assert!(again.is_err());
        assert!(srv
            .get_events_for_day(EventsQuery::new("u1", "2025-09-29"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_listing_validation() {
        let srv = service();
        assert_validation(
            srv.get_events_for_day(EventsQuery::new("", "2025-01-01")).await,
            "user_id",
            "can't be empty",
        );
        assert_validation(
            srv.get_events_for_week(EventsQuery::new("u1", "")).await,
            "date",
            "can't be empty",
        );
        assert_validation(
            srv.get_events_for_month(EventsQuery::new("u1", "2025-1-1")).await,
            "date",
            "format must be YYYY-MM-DD",
        );
    }

    #[tokio::test]
    async fn test_listings_scope_by_user_and_window() {
        let srv = service();
        for (user, date) in [
            ("u1", "2024-12-31"),
            ("u1", "2025-01-01"),
            ("u1", "2025-01-07"),
            ("u1", "2025-01-08"),
            ("u1", "2025-01-31"),
            ("u1", "2025-02-01"),
            ("u2", "2025-01-01"),
        ] {
            srv.create_event(request(user, "e", date)).await.unwrap();
        }

        let day = srv
            .get_events_for_day(EventsQuery::new("u1", "2025-01-01"))
            .await
            .unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].user_id, "u1");

        let week = srv
            .get_events_for_week(EventsQuery::new("u1", "2025-01-01"))
            .await
            .unwrap();
        assert_eq!(week.len(), 2);

        let month = srv
            .get_events_for_month(EventsQuery::new("u1", "2025-01-01"))
            .await
            .unwrap();
        assert_eq!(month.len(), 4);

        let empty = srv
            .get_events_for_day(EventsQuery::new("u3", "2025-01-01"))
            .await
            .unwrap();
        assert!(empty.is_empty());
    }
}

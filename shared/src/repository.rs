//! Event persistence.
//!
//! [`EventRepository`] is the seam between the service and storage. The
//! PostgreSQL implementation issues one parameterized statement per call
//! against an owned connection pool; there are no transactions or retries.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use tracing::error;

use crate::dates::{day_start, month_window, week_window};
use crate::models::Event;
use crate::{Error, Result};

/// Storage contract for events. Inputs are already validated.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event.
    async fn create_event(&self, event: &Event) -> Result<()>;

    /// Events of `user_id` dated exactly `date`.
    async fn get_events_for_day(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>>;

    /// Events of `user_id` from `date` through the end of the seventh day.
    async fn get_events_for_week(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>>;

    /// Events of `user_id` from `date` up to, not including, one calendar month later.
    async fn get_events_for_month(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>>;

    /// Remove an event. Fails with [`Error::NotFound`] when no row matched.
    async fn delete_event(&self, event_id: &str) -> Result<()>;

    /// Overwrite every field of an event. Fails with [`Error::NotFound`] when no row matched.
    async fn update_event(&self, event: &Event) -> Result<()>;
}

/// Event row from database
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    event_id: String,
    user_id: String,
    event: String,
    date: NaiveDateTime,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            user_id: row.user_id,
            event_id: row.event_id,
            date: row.date.date(),
            event: row.event,
        }
    }
}

pub(crate) fn not_found(event_id: &str) -> Error {
    Error::NotFound(format!("no event found with id: {}", event_id))
}

/// PostgreSQL-backed [`EventRepository`].
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shared listing query over an inclusive `[from, to]` or half-open
    /// `[from, to)` timestamp window.
    async fn fetch_range(
        &self,
        user_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
        inclusive_end: bool,
        label: &str,
    ) -> Result<Vec<Event>> {
        let query = if inclusive_end {
            r#"
            SELECT event_id, user_id, event, date
            FROM events
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date, event_id
            "#
        } else {
            r#"
            SELECT event_id, user_id, event, date
            FROM events
            WHERE user_id = $1 AND date >= $2 AND date < $3
            ORDER BY date, event_id
            "#
        };

        let rows: Vec<EventRow> = sqlx::query_as(query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "error getting events for {}", label);
                e
            })?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create_event(&self, event: &Event) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events (event_id, user_id, event, date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&event.event_id)
        .bind(&event.user_id)
        .bind(&event.event)
        .bind(day_start(event.date))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, event_id = %event.event_id, "error creating event");
            e
        })?;

        Ok(())
    }

    async fn get_events_for_day(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
            SELECT event_id, user_id, event, date
            FROM events
            WHERE user_id = $1 AND date = $2
            ORDER BY event_id
            "#,
        )
        .bind(user_id)
        .bind(day_start(date))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "error getting events for day");
            e
        })?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn get_events_for_week(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let (from, to) = week_window(date);
        self.fetch_range(user_id, from, to, true, "week").await
    }

    async fn get_events_for_month(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let (from, to) = month_window(date);
        self.fetch_range(user_id, from, to, false, "month").await
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, event_id, "error deleting event");
                e
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(event_id));
        }

        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET user_id = $1, event = $2, date = $3
            WHERE event_id = $4
            "#,
        )
        .bind(&event.user_id)
        .bind(&event.event)
        .bind(day_start(event.date))
        .bind(&event.event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, event_id = %event.event_id, "error updating event");
            e
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(&event.event_id));
        }

        Ok(())
    }
}

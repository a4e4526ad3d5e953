//! In-memory [`EventRepository`] for tests.
//!
//! Mirrors the PostgreSQL windows: day equality, inclusive seven-day week,
//! half-open calendar month.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::dates::{day_start, month_window, week_window};
use crate::models::Event;
use crate::repository::{not_found, EventRepository};
use crate::{Error, Result};

/// Events keyed by id, optionally failing every call.
#[derive(Debug, Default)]
pub struct MemoryEventRepository {
    events: RwLock<HashMap<String, Event>>,
    fail_with: Option<String>,
}

impl MemoryEventRepository {
    /// A repository whose every call fails with `message`, standing in for a broken database.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn check_failure(&self) -> Result<()> {
        match &self.fail_with {
            Some(msg) => Err(Error::Internal(msg.clone())),
            None => Ok(()),
        }
    }

    async fn matching(
        &self,
        user_id: &str,
        keep: impl Fn(chrono::NaiveDateTime) -> bool,
    ) -> Result<Vec<Event>> {
        self.check_failure()?;
        let events = self.events.read().await;
        let mut found: Vec<Event> = events
            .values()
            .filter(|e| e.user_id == user_id && keep(day_start(e.date)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.event_id.cmp(&b.event_id)));
        Ok(found)
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn create_event(&self, event: &Event) -> Result<()> {
        self.check_failure()?;
        let mut events = self.events.write().await;
        if events.contains_key(&event.event_id) {
            return Err(Error::Internal(format!(
                "duplicate event id: {}",
                event.event_id
            )));
        }
        events.insert(event.event_id.clone(), event.clone());
        Ok(())
    }

    async fn get_events_for_day(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let day = day_start(date);
        self.matching(user_id, |at| at == day).await
    }

    async fn get_events_for_week(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let (from, to) = week_window(date);
        self.matching(user_id, |at| at >= from && at <= to).await
    }

    async fn get_events_for_month(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let (from, to) = month_window(date);
        self.matching(user_id, |at| at >= from && at < to).await
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.check_failure()?;
        match self.events.write().await.remove(event_id) {
            Some(_) => Ok(()),
            None => Err(not_found(event_id)),
        }
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        self.check_failure()?;
        let mut events = self.events.write().await;
        match events.get_mut(&event.event_id) {
            Some(slot) => {
                *slot = event.clone();
                Ok(())
            }
            None => Err(not_found(&event.event_id)),
        }
    }
}

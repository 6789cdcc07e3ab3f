//! Event repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::utils::errors::RaffleBuddyError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, RaffleBuddyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (meetup_id, title, description, event_date, event_url, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, meetup_id, title, description, event_date, event_url, status, created_at, updated_at
            "#
        )
        .bind(request.meetup_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.event_url)
        .bind(request.status)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, RaffleBuddyError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, meetup_id, title, description, event_date, event_url, status, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by its external Meetup ID
    pub async fn find_by_meetup_id(&self, meetup_id: &str) -> Result<Option<Event>, RaffleBuddyError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, meetup_id, title, description, event_date, event_url, status, created_at, updated_at FROM events WHERE meetup_id = $1"
        )
        .bind(meetup_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, RaffleBuddyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                event_url = COALESCE($5, event_url),
                status = COALESCE($6, status),
                updated_at = $7
            WHERE id = $1
            RETURNING id, meetup_id, title, description, event_date, event_url, status, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.event_url)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event
    pub async fn delete(&self, id: i64) -> Result<(), RaffleBuddyError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List events with pagination, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>, RaffleBuddyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, meetup_id, title, description, event_date, event_url, status, created_at, updated_at FROM events ORDER BY event_date DESC NULLS LAST LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List all events, newest first
    pub async fn list_all(&self) -> Result<Vec<Event>, RaffleBuddyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, meetup_id, title, description, event_date, event_url, status, created_at, updated_at FROM events ORDER BY event_date DESC NULLS LAST"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, RaffleBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

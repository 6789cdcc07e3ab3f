//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub meetup_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_url: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub meetup_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_url: Option<String>,
    pub status: Option<String>,
}

//! Raffle model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Raffle {
    pub id: i64,
    pub event_id: i64,
    pub meetup_event_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRaffleRequest {
    pub event_id: i64,
    pub meetup_event_id: String,
}

//! Raffle repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::raffle::{CreateRaffleRequest, Raffle};
use crate::utils::errors::RaffleBuddyError;

#[derive(Debug, Clone)]
pub struct RaffleRepository {
    pool: PgPool,
}

impl RaffleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new raffle
    pub async fn create(&self, request: CreateRaffleRequest) -> Result<Raffle, RaffleBuddyError> {
        let raffle = sqlx::query_as::<_, Raffle>(
            r#"
            INSERT INTO raffles (event_id, meetup_event_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, meetup_event_id, created_at, updated_at
            "#
        )
        .bind(request.event_id)
        .bind(request.meetup_event_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(raffle)
    }

    /// Find raffle by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Raffle>, RaffleBuddyError> {
        let raffle = sqlx::query_as::<_, Raffle>(
            "SELECT id, event_id, meetup_event_id, created_at, updated_at FROM raffles WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raffle)
    }

    /// Find raffle by its event
    pub async fn find_by_event_id(&self, event_id: i64) -> Result<Option<Raffle>, RaffleBuddyError> {
        let raffle = sqlx::query_as::<_, Raffle>(
            "SELECT id, event_id, meetup_event_id, created_at, updated_at FROM raffles WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raffle)
    }

    /// Find raffle by the external Meetup event ID
    pub async fn find_by_meetup_event_id(&self, meetup_event_id: &str) -> Result<Option<Raffle>, RaffleBuddyError> {
        let raffle = sqlx::query_as::<_, Raffle>(
            "SELECT id, event_id, meetup_event_id, created_at, updated_at FROM raffles WHERE meetup_event_id = $1"
        )
        .bind(meetup_event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raffle)
    }

    /// List all raffles, newest first
    pub async fn list_all(&self) -> Result<Vec<Raffle>, RaffleBuddyError> {
        let raffles = sqlx::query_as::<_, Raffle>(
            "SELECT id, event_id, meetup_event_id, created_at, updated_at FROM raffles ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(raffles)
    }

    /// Delete raffle
    pub async fn delete(&self, id: i64) -> Result<(), RaffleBuddyError> {
        sqlx::query("DELETE FROM raffles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count total raffles
    pub async fn count(&self) -> Result<i64, RaffleBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM raffles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

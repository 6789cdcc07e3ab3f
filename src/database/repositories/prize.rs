//! Prize repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::prize::{CreatePrizeRequest, Prize, UpdatePrizeRequest};
use crate::utils::errors::RaffleBuddyError;

#[derive(Debug, Clone)]
pub struct PrizeRepository {
    pool: PgPool,
}

impl PrizeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new prize
    pub async fn create(&self, request: CreatePrizeRequest) -> Result<Prize, RaffleBuddyError> {
        let prize = sqlx::query_as::<_, Prize>(
            r#"
            INSERT INTO prizes (raffle_id, name, description, template_text, voucher_code, valid_until, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, raffle_id, name, description, template_text, voucher_code, valid_until, winner_participant_id, winner_name, created_at, updated_at
            "#
        )
        .bind(request.raffle_id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.template_text)
        .bind(request.voucher_code)
        .bind(request.valid_until)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Find prize by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Prize>, RaffleBuddyError> {
        let prize = sqlx::query_as::<_, Prize>(
            "SELECT id, raffle_id, name, description, template_text, voucher_code, valid_until, winner_participant_id, winner_name, created_at, updated_at FROM prizes WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Get all prizes for a raffle
    pub async fn find_by_raffle(&self, raffle_id: i64) -> Result<Vec<Prize>, RaffleBuddyError> {
        let prizes = sqlx::query_as::<_, Prize>(
            "SELECT id, raffle_id, name, description, template_text, voucher_code, valid_until, winner_participant_id, winner_name, created_at, updated_at FROM prizes WHERE raffle_id = $1 ORDER BY id ASC"
        )
        .bind(raffle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prizes)
    }

    /// Update prize
    pub async fn update(&self, id: i64, request: UpdatePrizeRequest) -> Result<Prize, RaffleBuddyError> {
        let prize = sqlx::query_as::<_, Prize>(
            r#"
            UPDATE prizes
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                template_text = COALESCE($4, template_text),
                voucher_code = COALESCE($5, voucher_code),
                valid_until = COALESCE($6, valid_until),
                updated_at = $7
            WHERE id = $1
            RETURNING id, raffle_id, name, description, template_text, voucher_code, valid_until, winner_participant_id, winner_name, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.template_text)
        .bind(request.voucher_code)
        .bind(request.valid_until)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Store the winner and the rendered template text for a prize
    pub async fn set_winner(
        &self,
        id: i64,
        winner_participant_id: i64,
        winner_name: &str,
        template_text: Option<&str>,
    ) -> Result<Prize, RaffleBuddyError> {
        let prize = sqlx::query_as::<_, Prize>(
            r#"
            UPDATE prizes
            SET winner_participant_id = $2,
                winner_name = $3,
                template_text = COALESCE($4, template_text),
                updated_at = $5
            WHERE id = $1
            RETURNING id, raffle_id, name, description, template_text, voucher_code, valid_until, winner_participant_id, winner_name, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(winner_participant_id)
        .bind(winner_name)
        .bind(template_text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Delete prize
    pub async fn delete(&self, id: i64) -> Result<(), RaffleBuddyError> {
        sqlx::query("DELETE FROM prizes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count prizes for a raffle
    pub async fn count_by_raffle(&self, raffle_id: i64) -> Result<i64, RaffleBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prizes WHERE raffle_id = $1")
            .bind(raffle_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

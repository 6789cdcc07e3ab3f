//! Prize template repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::prize::{CreatePrizeTemplateRequest, PrizeTemplate, UpdatePrizeTemplateRequest};
use crate::utils::errors::RaffleBuddyError;

#[derive(Debug, Clone)]
pub struct PrizeTemplateRepository {
    pool: PgPool,
}

impl PrizeTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new prize template
    pub async fn create(&self, request: CreatePrizeTemplateRequest) -> Result<PrizeTemplate, RaffleBuddyError> {
        let template = sqlx::query_as::<_, PrizeTemplate>(
            r#"
            INSERT INTO prize_templates (name, description, template_text, voucher_code, valid_until, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, template_text, voucher_code, valid_until, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.description)
        .bind(request.template_text)
        .bind(request.voucher_code)
        .bind(request.valid_until)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    /// Find prize template by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PrizeTemplate>, RaffleBuddyError> {
        let template = sqlx::query_as::<_, PrizeTemplate>(
            "SELECT id, name, description, template_text, voucher_code, valid_until, created_at, updated_at FROM prize_templates WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    /// List all prize templates
    pub async fn list_all(&self) -> Result<Vec<PrizeTemplate>, RaffleBuddyError> {
        let templates = sqlx::query_as::<_, PrizeTemplate>(
            "SELECT id, name, description, template_text, voucher_code, valid_until, created_at, updated_at FROM prize_templates ORDER BY name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    /// Find prize templates by name pattern (case-insensitive substring)
    pub async fn find_by_name_pattern(&self, pattern: &str) -> Result<Vec<PrizeTemplate>, RaffleBuddyError> {
        let templates = sqlx::query_as::<_, PrizeTemplate>(
            "SELECT id, name, description, template_text, voucher_code, valid_until, created_at, updated_at FROM prize_templates WHERE name ILIKE $1 ORDER BY name ASC"
        )
        .bind(format!("%{}%", pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    /// Update prize template
    pub async fn update(&self, id: i64, request: UpdatePrizeTemplateRequest) -> Result<PrizeTemplate, RaffleBuddyError> {
        let template = sqlx::query_as::<_, PrizeTemplate>(
            r#"
            UPDATE prize_templates
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                template_text = COALESCE($4, template_text),
                voucher_code = COALESCE($5, voucher_code),
                valid_until = COALESCE($6, valid_until),
                updated_at = $7
            WHERE id = $1
            RETURNING id, name, description, template_text, voucher_code, valid_until, created_at, updated_at
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

        Ok(template)
    }

    /// Delete prize template
    pub async fn delete(&self, id: i64) -> Result<(), RaffleBuddyError> {
        sqlx::query("DELETE FROM prize_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count total prize templates
    pub async fn count(&self) -> Result<i64, RaffleBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prize_templates")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

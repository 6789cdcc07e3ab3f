//! Member repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::utils::errors::RaffleBuddyError;

#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new member
    pub async fn create(&self, request: CreateMemberRequest) -> Result<Member, RaffleBuddyError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (meetup_id, name, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, meetup_id, name, email, created_at, updated_at
            "#
        )
        .bind(request.meetup_id)
        .bind(request.name)
        .bind(request.email)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Find member by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RaffleBuddyError> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, meetup_id, name, email, created_at, updated_at FROM members WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Find member by its external Meetup ID
    pub async fn find_by_meetup_id(&self, meetup_id: &str) -> Result<Option<Member>, RaffleBuddyError> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, meetup_id, name, email, created_at, updated_at FROM members WHERE meetup_id = $1"
        )
        .bind(meetup_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Update member
    pub async fn update(&self, id: i64, request: UpdateMemberRequest) -> Result<Member, RaffleBuddyError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = $4
            WHERE id = $1
            RETURNING id, meetup_id, name, email, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Delete member
    pub async fn delete(&self, id: i64) -> Result<(), RaffleBuddyError> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List members with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Member>, RaffleBuddyError> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, meetup_id, name, email, created_at, updated_at FROM members ORDER BY name ASC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Count total members
    pub async fn count(&self) -> Result<i64, RaffleBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

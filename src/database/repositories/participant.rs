//! Participant repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::participant::{
    AttendanceStatus, CreateParticipantRequest, Participant, ParticipantDetails, RsvpStatus,
};
use crate::utils::errors::RaffleBuddyError;

const DETAILS_COLUMNS: &str = r#"
    p.id, p.event_id, p.member_id,
    m.meetup_id AS member_meetup_id, m.name AS member_name, m.email AS member_email,
    p.rsvp_id, p.is_organizer, p.has_entered_raffle,
    p.rsvp_status, p.attendance_status, p.last_updated
"#;

#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new participant
    pub async fn create(&self, request: CreateParticipantRequest) -> Result<Participant, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (event_id, member_id, rsvp_id, is_organizer, rsvp_status, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated
            "#
        )
        .bind(request.event_id)
        .bind(request.member_id)
        .bind(request.rsvp_id)
        .bind(request.is_organizer)
        .bind(request.rsvp_status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Find participant by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Participant>, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated FROM participants WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Find participant by event and member
    pub async fn find_by_event_and_member(&self, event_id: i64, member_id: i64) -> Result<Option<Participant>, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated FROM participants WHERE event_id = $1 AND member_id = $2"
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Get all participants for an event
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<Participant>, RaffleBuddyError> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated FROM participants WHERE event_id = $1 ORDER BY id ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Get all participants for an event joined with member details
    pub async fn find_details_by_event(&self, event_id: i64) -> Result<Vec<ParticipantDetails>, RaffleBuddyError> {
        let query = format!(
            "SELECT {DETAILS_COLUMNS} FROM participants p INNER JOIN members m ON m.id = p.member_id WHERE p.event_id = $1 ORDER BY m.name ASC"
        );
        let participants = sqlx::query_as::<_, ParticipantDetails>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(participants)
    }

    /// Get participant with member details by ID
    pub async fn find_details_by_id(&self, id: i64) -> Result<Option<ParticipantDetails>, RaffleBuddyError> {
        let query = format!(
            "SELECT {DETAILS_COLUMNS} FROM participants p INNER JOIN members m ON m.id = p.member_id WHERE p.id = $1"
        );
        let participant = sqlx::query_as::<_, ParticipantDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(participant)
    }

    /// Get raffle-eligible participants for an event:
    /// RSVP yes, not an organizer, not already entered
    pub async fn find_raffle_eligible(&self, event_id: i64) -> Result<Vec<ParticipantDetails>, RaffleBuddyError> {
        let query = format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM participants p
            INNER JOIN members m ON m.id = p.member_id
            WHERE p.event_id = $1
              AND p.rsvp_status = $2
              AND p.is_organizer = FALSE
              AND p.has_entered_raffle = FALSE
            ORDER BY m.name ASC
            "#
        );
        let participants = sqlx::query_as::<_, ParticipantDetails>(&query)
            .bind(event_id)
            .bind(RsvpStatus::Yes.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(participants)
    }

    /// Update RSVP data from a synchronization run
    pub async fn update_rsvp(
        &self,
        id: i64,
        rsvp_id: Option<&str>,
        rsvp_status: RsvpStatus,
        is_organizer: bool,
    ) -> Result<Participant, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET rsvp_id = COALESCE($2, rsvp_id),
                rsvp_status = $3,
                is_organizer = $4,
                last_updated = $5
            WHERE id = $1
            RETURNING id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated
            "#
        )
        .bind(id)
        .bind(rsvp_id)
        .bind(rsvp_status.as_str())
        .bind(is_organizer)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Set RSVP status only
    pub async fn set_rsvp_status(&self, id: i64, status: RsvpStatus) -> Result<Participant, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET rsvp_status = $2, last_updated = $3
            WHERE id = $1
            RETURNING id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated
            "#
        )
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Set attendance status
    pub async fn set_attendance_status(&self, id: i64, status: AttendanceStatus) -> Result<Participant, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET attendance_status = $2, last_updated = $3
            WHERE id = $1
            RETURNING id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated
            "#
        )
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Set the raffle-entry flag
    pub async fn set_raffle_entry(&self, id: i64, has_entered: bool) -> Result<Participant, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET has_entered_raffle = $2, last_updated = $3
            WHERE id = $1
            RETURNING id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated
            "#
        )
        .bind(id)
        .bind(has_entered)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Set attendance status and raffle-entry flag in one step
    pub async fn set_attendance_and_raffle_entry(
        &self,
        id: i64,
        status: AttendanceStatus,
        has_entered: bool,
    ) -> Result<Participant, RaffleBuddyError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET attendance_status = $2, has_entered_raffle = $3, last_updated = $4
            WHERE id = $1
            RETURNING id, event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status, attendance_status, last_updated
            "#
        )
        .bind(id)
        .bind(status.as_str())
        .bind(has_entered)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Clear the raffle-entry flag for every participant of an event
    pub async fn reset_raffle_entries(&self, event_id: i64) -> Result<u64, RaffleBuddyError> {
        let result = sqlx::query(
            "UPDATE participants SET has_entered_raffle = FALSE, last_updated = $2 WHERE event_id = $1"
        )
        .bind(event_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Get participant count for an event
    pub async fn count_by_event(&self, event_id: i64) -> Result<i64, RaffleBuddyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM participants WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}

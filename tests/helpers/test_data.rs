//! Test data helpers for inserting fixture rows

use chrono::Utc;
use sqlx::PgPool;

/// Insert a minimal event and return its id
pub async fn insert_event(pool: &PgPool, meetup_id: &str, title: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO events (meetup_id, title, event_date, status)
        VALUES ($1, $2, $3, 'ACTIVE')
        RETURNING id
        "#,
    )
    .bind(meetup_id)
    .bind(title)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .expect("Failed to insert test event")
}

/// Insert a minimal member and return its id
pub async fn insert_member(pool: &PgPool, meetup_id: &str, name: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO members (meetup_id, name, email)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(meetup_id)
    .bind(name)
    .bind(format!("{}@example.com", meetup_id))
    .fetch_one(pool)
    .await
    .expect("Failed to insert test member")
}

/// Insert a participant row and return its id
pub async fn insert_participant(
    pool: &PgPool,
    event_id: i64,
    member_id: i64,
    is_organizer: bool,
    has_entered_raffle: bool,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO participants (event_id, member_id, rsvp_id, is_organizer, has_entered_raffle, rsvp_status)
        VALUES ($1, $2, $3, $4, $5, 'yes')
        RETURNING id
        "#,
    )
    .bind(event_id)
    .bind(member_id)
    .bind(format!("rsvp-{}-{}", event_id, member_id))
    .bind(is_organizer)
    .bind(has_entered_raffle)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test participant")
}

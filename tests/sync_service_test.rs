//! Integration tests for the Meetup synchronization service
//!
//! These tests run against a containerized PostgreSQL instance (or
//! `TEST_DATABASE_URL`) with the mock Meetup client serving fixtures.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;
use helpers::database_helper::TestDatabase;
use helpers::test_data;
use RaffleBuddy::database::DatabaseService;
use RaffleBuddy::services::meetup::{MeetupClient, MockMeetupClient};
use RaffleBuddy::services::sync::MeetupSyncService;
use RaffleBuddy::utils::errors::RaffleBuddyError;

fn sync_service(db: &TestDatabase) -> MeetupSyncService {
    let database = DatabaseService::new(db.pool.clone());
    MeetupSyncService::new(
        MeetupClient::Mock(MockMeetupClient::new()),
        database.events,
        database.members,
        database.participants,
    )
}

#[tokio::test]
#[serial]
async fn test_import_event_creates_members_and_participants() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let (event, synced) = service.import_event("305897255").await.expect("Import failed");

    assert_eq!(event.meetup_id, "305897255");
    assert!(event.title.contains("OpenRewrite"));
    assert!(event.event_date.is_some());
    assert_eq!(synced, 4);

    assert_eq!(db.count_records("members").await.unwrap(), 4);
    assert_eq!(db.count_records("participants").await.unwrap(), 4);

    // The host is flagged as organizer
    let participants = service.get_participants_for_event(event.id).await.unwrap();
    let host = participants.iter().find(|p| p.is_organizer).expect("No organizer found");
    assert_eq!(host.member_name, "Eula Lane");

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_import_event_is_idempotent() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let (first, _) = service.import_event("305897255").await.unwrap();
    let (second, _) = service.import_event("305897255").await.unwrap();

    // Re-running upserts the same rows instead of duplicating them
    assert_eq!(first.id, second.id);
    assert_eq!(db.count_records("events").await.unwrap(), 1);
    assert_eq!(db.count_records("members").await.unwrap(), 4);
    assert_eq!(db.count_records("participants").await.unwrap(), 4);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_import_unknown_event_fails() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let result = service.import_event("999999").await;
    assert_matches!(result, Err(RaffleBuddyError::MeetupEventNotFound { .. }));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_sync_flags_missing_participants_as_declined() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let (event, _) = service.import_event("305897255").await.unwrap();

    // A participant no longer present in the RSVP list
    let gone_member = test_data::insert_member(&db.pool, "999999999", "Gone Member").await;
    let gone_participant =
        test_data::insert_participant(&db.pool, event.id, gone_member, false, false).await;

    let synced = service.sync_event_members(event.id).await.unwrap();
    assert_eq!(synced, 5); // 4 upserts + 1 declined

    let participants = service.get_participants_for_event(event.id).await.unwrap();
    let declined = participants.iter().find(|p| p.id == gone_participant).unwrap();
    assert_eq!(declined.rsvp_status, "no");

    // The others stay confirmed
    let confirmed = participants.iter().filter(|p| p.rsvp_status == "yes").count();
    assert_eq!(confirmed, 4);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_bulk_import_reports_failures() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let ids = vec![
        "305897255".to_string(),
        "999999".to_string(),
        "306898838".to_string(),
    ];
    let report = service.import_events(&ids).await;

    assert_eq!(report.imported, vec!["305897255", "306898838"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].meetup_id, "999999");

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_participant_transitions() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let (event, _) = service.import_event("305897255").await.unwrap();
    let participants = service.get_participants_for_event(event.id).await.unwrap();
    let participant = participants.iter().find(|p| !p.is_organizer).unwrap();

    let updated = service.mark_participant_attended(participant.id).await.unwrap();
    assert_eq!(updated.attendance_status, "attended");

    let updated = service.mark_participant_no_show(participant.id).await.unwrap();
    assert_eq!(updated.attendance_status, "no_show");

    let updated = service.reset_participant_attendance(participant.id).await.unwrap();
    assert_eq!(updated.attendance_status, "unknown");

    let updated = service.mark_participant_entered_raffle(participant.id).await.unwrap();
    assert!(updated.has_entered_raffle);

    let updated = service.mark_participant_not_entered_raffle(participant.id).await.unwrap();
    assert!(!updated.has_entered_raffle);

    let updated = service
        .mark_participant_no_show_and_entered(participant.id)
        .await
        .unwrap();
    assert_eq!(updated.attendance_status, "no_show");
    assert!(updated.has_entered_raffle);

    let unknown = service.mark_participant_attended(i64::MAX).await;
    assert_matches!(unknown, Err(RaffleBuddyError::ParticipantNotFound { .. }));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_reset_raffle_entries_for_event() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = sync_service(&db);

    let (event, _) = service.import_event("305897255").await.unwrap();
    let participants = service.get_participants_for_event(event.id).await.unwrap();

    for participant in &participants {
        service.mark_participant_entered_raffle(participant.id).await.unwrap();
    }

    let reset = service.reset_raffle_entries_for_event(event.id).await.unwrap();
    assert_eq!(reset as usize, participants.len());

    let eligible = service.get_raffle_eligible_participants(event.id).await.unwrap();
    // Everyone but the organizer is eligible again
    assert_eq!(eligible.len(), participants.len() - 1);

    db.cleanup().await.unwrap();
}

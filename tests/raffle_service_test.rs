//! Integration tests for raffle, prize and drawing flows

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;
use helpers::database_helper::TestDatabase;
use RaffleBuddy::database::DatabaseService;
use RaffleBuddy::models::prize::CreatePrizeTemplateRequest;
use RaffleBuddy::services::drawing::DrawingService;
use RaffleBuddy::services::meetup::{MeetupClient, MockMeetupClient};
use RaffleBuddy::services::raffle::RaffleService;
use RaffleBuddy::services::sample_data::SampleDataService;
use RaffleBuddy::services::sync::MeetupSyncService;
use RaffleBuddy::utils::errors::RaffleBuddyError;

struct TestServices {
    sync: MeetupSyncService,
    raffle: RaffleService,
    drawing: DrawingService,
    sample_data: SampleDataService,
}

fn services(db: &TestDatabase) -> TestServices {
    let database = DatabaseService::new(db.pool.clone());

    TestServices {
        sync: MeetupSyncService::new(
            MeetupClient::Mock(MockMeetupClient::new()),
            database.events.clone(),
            database.members.clone(),
            database.participants.clone(),
        ),
        raffle: RaffleService::new(
            database.raffles.clone(),
            database.prizes.clone(),
            database.prize_templates.clone(),
            database.events.clone(),
            database.participants.clone(),
        ),
        drawing: DrawingService::new(
            database.raffles.clone(),
            database.participants.clone(),
        ),
        sample_data: SampleDataService::new(database),
    }
}

fn license_template() -> CreatePrizeTemplateRequest {
    CreatePrizeTemplateRequest {
        name: "IntelliJ License".to_string(),
        description: Some("One year".to_string()),
        template_text: Some(
            "Congrats {{WINNER_NAME}}! {{PRIZE_NAME}} from the {{RAFFLE_DATE}} meetup, \
             code {{VOUCHER_CODE}}"
                .to_string(),
        ),
        voucher_code: Some("JB-DEFAULT".to_string()),
        valid_until: None,
    }
}

#[tokio::test]
#[serial]
async fn test_create_raffle_once_per_event() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    svc.sync.import_event("305897255").await.unwrap();

    let raffle = svc.raffle.create_raffle("305897255").await.unwrap();
    assert_eq!(raffle.meetup_event_id, "305897255");

    // A second raffle for the same event is a conflict
    let duplicate = svc.raffle.create_raffle("305897255").await;
    assert_matches!(duplicate, Err(RaffleBuddyError::RaffleAlreadyExists { .. }));

    // Unknown events cannot get a raffle
    let unknown = svc.raffle.create_raffle("424242").await;
    assert_matches!(unknown, Err(RaffleBuddyError::MeetupEventNotFound { .. }));

    // Lookup by external id resolves the same raffle
    let by_meetup_id = svc.raffle
        .get_raffle_by_meetup_event_id("305897255")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_meetup_id.id, raffle.id);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_prize_from_template_renders_date_and_voucher() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    svc.sync.import_event("306898838").await.unwrap();
    let raffle = svc.raffle.create_raffle("306898838").await.unwrap();

    let template = svc.raffle.create_prize_template(license_template()).await.unwrap();

    let prize = svc.raffle
        .create_prize_from_template(template.id, raffle.id, Some("JB-OVERRIDE".to_string()))
        .await
        .unwrap();

    assert_eq!(prize.raffle_id, raffle.id);
    assert_eq!(prize.voucher_code.as_deref(), Some("JB-OVERRIDE"));

    let text = prize.template_text.unwrap();
    // Date and voucher are rendered; the winner placeholder survives the draw
    assert!(text.contains("2025-05-19"));
    assert!(text.contains("JB-OVERRIDE"));
    assert!(text.contains("{{WINNER_NAME}}"));
    assert!(!text.contains("{{PRIZE_NAME}}"));

    // A blank voucher override keeps the template's code
    let prize2 = svc.raffle
        .create_prize_from_template(template.id, raffle.id, Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(prize2.voucher_code.as_deref(), Some("JB-DEFAULT"));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_award_prize_marks_winner() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    svc.sync.import_event("305897255").await.unwrap();
    let raffle = svc.raffle.create_raffle("305897255").await.unwrap();
    let template = svc.raffle.create_prize_template(license_template()).await.unwrap();
    let prize = svc.raffle
        .create_prize_from_template(template.id, raffle.id, None)
        .await
        .unwrap();

    let winner = svc.drawing.draw_winner(raffle.id).await.unwrap();
    assert!(!winner.is_organizer);

    let awarded = svc.raffle.award_prize(prize.id, winner.id).await.unwrap();

    assert_eq!(awarded.winner_participant_id, Some(winner.id));
    assert_eq!(awarded.winner_name.as_deref(), Some(winner.member_name.as_str()));

    let text = awarded.template_text.unwrap();
    assert!(text.contains(&winner.member_name));
    assert!(!text.contains("{{WINNER_NAME}}"));

    // The winner is now attended, entered, and no longer eligible
    let updated = svc.sync.get_participant_by_id(winner.id).await.unwrap().unwrap();
    assert_eq!(updated.attendance_status, "attended");
    assert!(updated.has_entered_raffle);

    let eligible = svc.drawing.get_eligible_participants(raffle.id).await.unwrap();
    assert!(eligible.iter().all(|p| p.id != winner.id));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_draw_excludes_organizers_and_entered() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    svc.sync.import_event("305897255").await.unwrap();
    let raffle = svc.raffle.create_raffle("305897255").await.unwrap();

    // 4 RSVPs, one of them the host
    let eligible = svc.drawing.get_eligible_participants(raffle.id).await.unwrap();
    assert_eq!(eligible.len(), 3);
    assert!(eligible.iter().all(|p| !p.is_organizer));

    // Entering everyone dries up the pool
    for participant in &eligible {
        svc.sync.mark_participant_entered_raffle(participant.id).await.unwrap();
    }

    let empty_draw = svc.drawing.draw_winner(raffle.id).await;
    assert_matches!(empty_draw, Err(RaffleBuddyError::NoEligibleParticipants { .. }));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_prize_template_search() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    svc.raffle.create_prize_template(license_template()).await.unwrap();
    svc.raffle
        .create_prize_template(CreatePrizeTemplateRequest {
            name: "OrbStack License".to_string(),
            description: None,
            template_text: None,
            voucher_code: None,
            valid_until: None,
        })
        .await
        .unwrap();

    let all = svc.raffle.get_all_prize_templates().await.unwrap();
    assert_eq!(all.len(), 2);

    let matched = svc.raffle.get_prize_templates_by_name("intellij").await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "IntelliJ License");

    let licenses = svc.raffle.get_prize_templates_by_name("license").await.unwrap();
    assert_eq!(licenses.len(), 2);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_delete_raffle_removes_prizes() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    svc.sync.import_event("305897255").await.unwrap();
    let raffle = svc.raffle.create_raffle("305897255").await.unwrap();
    let template = svc.raffle.create_prize_template(license_template()).await.unwrap();
    svc.raffle
        .create_prize_from_template(template.id, raffle.id, None)
        .await
        .unwrap();

    assert_eq!(db.count_records("prizes").await.unwrap(), 1);

    svc.raffle.delete_raffle(raffle.id).await.unwrap();

    assert_eq!(db.count_records("raffles").await.unwrap(), 0);
    assert_eq!(db.count_records("prizes").await.unwrap(), 0);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_sample_data_loads_once() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let svc = services(&db);

    let summary = svc.sample_data.load_sample_data().await.unwrap();
    assert_eq!(summary["events_loaded"], 2);
    assert_eq!(summary["raffles_loaded"], 2);
    assert_eq!(summary["prize_templates_loaded"], 2);

    assert!(db.count_records("members").await.unwrap() > 0);
    assert!(db.count_records("participants").await.unwrap() > 0);

    // Re-running is a no-op
    let second = svc.sample_data.load_sample_data().await.unwrap();
    assert_eq!(second["events_loaded"], 0);
    assert_eq!(second["raffles_loaded"], 0);
    assert_eq!(second["prize_templates_loaded"], 0);

    db.cleanup().await.unwrap();
}

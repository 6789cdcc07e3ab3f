//! Sample data service implementation
//!
//! Seeds a small, self-consistent data set for demos and local development.
//! Each section is only loaded when its table is empty, so re-running the
//! endpoint is harmless.

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use crate::database::DatabaseService;
use crate::models::event::CreateEventRequest;
use crate::models::member::CreateMemberRequest;
use crate::models::participant::{CreateParticipantRequest, RsvpStatus};
use crate::models::prize::CreatePrizeTemplateRequest;
use crate::models::raffle::CreateRaffleRequest;
use crate::utils::errors::Result;

/// Service for loading sample data, triggered via HTTP
#[derive(Debug, Clone)]
pub struct SampleDataService {
    database: DatabaseService,
}

impl SampleDataService {
    /// Create a new SampleDataService instance
    pub fn new(database: DatabaseService) -> Self {
        Self { database }
    }

    /// Load sample data into the database
    pub async fn load_sample_data(&self) -> Result<serde_json::Value> {
        let mut loaded_events = 0u32;
        let mut loaded_raffles = 0u32;
        let mut loaded_templates = 0u32;

        // Only load events (with members and participants) if none exist yet
        if self.database.events.count().await? == 0 {
            loaded_events = self.load_sample_events().await?;
        }

        // Only load raffles if none exist yet
        if self.database.raffles.count().await? == 0 {
            loaded_raffles = self.load_sample_raffles().await?;
        }

        // Only load prize templates if none exist yet
        if self.database.prize_templates.count().await? == 0 {
            loaded_templates = self.load_sample_prize_templates().await?;
        }

        info!(
            events = loaded_events,
            raffles = loaded_raffles,
            templates = loaded_templates,
            "Sample data loaded"
        );

        Ok(json!({
            "events_loaded": loaded_events,
            "raffles_loaded": loaded_raffles,
            "prize_templates_loaded": loaded_templates,
        }))
    }

    async fn load_sample_events(&self) -> Result<u32> {
        let past_event = self.database.events
            .create(CreateEventRequest {
                meetup_id: "306898838".to_string(),
                title: "\"Engineering a better Java build tool\" + \"Vaadin 24 in the real world\""
                    .to_string(),
                description: Some("Joint Meetup with Scala Vienna.\n19:55 Raffle".to_string()),
                event_date: Some(Utc::now() - Duration::days(14)),
                event_url: Some("https://www.meetup.com/java-vienna/events/306898838/".to_string()),
                status: Some("PAST".to_string()),
            })
            .await?;

        let upcoming_event = self.database.events
            .create(CreateEventRequest {
                meetup_id: "305897255".to_string(),
                title: "\"OpenRewrite in a Nutshell\" + \"how John started to like TDD\"".to_string(),
                description: Some("18:30 OpenRewrite in a Nutshell\n19:55 raffle".to_string()),
                event_date: Some(Utc::now() + Duration::days(14)),
                event_url: Some("https://www.meetup.com/java-vienna/events/305897255/".to_string()),
                status: Some("ACTIVE".to_string()),
            })
            .await?;

        let samples = [
            ("188374001", "Eula Lane", Some("eula.lane@jigrormo.ye"), true),
            ("188374002", "Barry Rodriquez", Some("barry.rodriquez@zun.mm"), false),
            ("188374003", "Leta Kelley", Some("leta.kelley@wudawpe.sa"), false),
            ("188374004", "Milton Burns", None, false),
        ];

        for (meetup_id, name, email, is_organizer) in samples {
            let member = self.database.members
                .create(CreateMemberRequest {
                    meetup_id: meetup_id.to_string(),
                    name: name.to_string(),
                    email: email.map(|e| e.to_string()),
                })
                .await?;

            for event_id in [past_event.id, upcoming_event.id] {
                self.database.participants
                    .create(CreateParticipantRequest {
                        event_id,
                        member_id: member.id,
                        rsvp_id: Some(format!("rsvp-{}-{}", event_id, member.id)),
                        is_organizer,
                        rsvp_status: RsvpStatus::Yes,
                    })
                    .await?;
            }
        }

        Ok(2)
    }

    async fn load_sample_raffles(&self) -> Result<u32> {
        let mut created = 0u32;

        for meetup_id in ["306898838", "305897255"] {
            if let Some(event) = self.database.events.find_by_meetup_id(meetup_id).await? {
                self.database.raffles
                    .create(CreateRaffleRequest {
                        event_id: event.id,
                        meetup_event_id: meetup_id.to_string(),
                    })
                    .await?;
                created += 1;
            }
        }

        Ok(created)
    }

    async fn load_sample_prize_templates(&self) -> Result<u32> {
        self.database.prize_templates
            .create(CreatePrizeTemplateRequest {
                name: "IntelliJ IDEA License".to_string(),
                description: Some("One year personal license".to_string()),
                template_text: Some(
                    "Congrats {{WINNER_NAME}}! You won {{PRIZE_NAME}} at our {{RAFFLE_DATE}} \
                     meetup. Redeem with code {{VOUCHER_CODE}} until {{VALID_UNTIL}}."
                        .to_string(),
                ),
                voucher_code: Some(format!("JB-{}", short_voucher_code())),
                valid_until: Some((Utc::now() + Duration::days(180)).date_naive()),
            })
            .await?;

        self.database.prize_templates
            .create(CreatePrizeTemplateRequest {
                name: "OrbStack License".to_string(),
                description: Some("One year license".to_string()),
                template_text: Some(
                    "{{WINNER_NAME}} won {{PRIZE_NAME}}. Voucher: {{VOUCHER_CODE}}".to_string(),
                ),
                voucher_code: Some(format!("ORB-{}", short_voucher_code())),
                valid_until: None,
            })
            .await?;

        Ok(2)
    }
}

fn short_voucher_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_voucher_code_shape() {
        let code = short_voucher_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(code, code.to_uppercase());
    }
}

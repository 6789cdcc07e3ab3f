//! Raffle service implementation
//!
//! This service owns raffle lifecycle, prize management, prize templates and
//! the award flow.

use tracing::{debug, info};
use crate::database::repositories::{
    EventRepository, ParticipantRepository, PrizeRepository, PrizeTemplateRepository,
    RaffleRepository,
};
use crate::models::participant::AttendanceStatus;
use crate::models::prize::{
    render_template_text, CreatePrizeRequest, CreatePrizeTemplateRequest, Prize, PrizeTemplate,
    TemplateContext, UpdatePrizeRequest, UpdatePrizeTemplateRequest,
};
use crate::models::raffle::{CreateRaffleRequest, Raffle};
use crate::utils::errors::{RaffleBuddyError, Result};
use crate::utils::helpers::format_raffle_date;

/// Service for raffle and prize management
#[derive(Debug, Clone)]
pub struct RaffleService {
    raffle_repository: RaffleRepository,
    prize_repository: PrizeRepository,
    prize_template_repository: PrizeTemplateRepository,
    event_repository: EventRepository,
    participant_repository: ParticipantRepository,
}

impl RaffleService {
    /// Create a new RaffleService instance
    pub fn new(
        raffle_repository: RaffleRepository,
        prize_repository: PrizeRepository,
        prize_template_repository: PrizeTemplateRepository,
        event_repository: EventRepository,
        participant_repository: ParticipantRepository,
    ) -> Self {
        Self {
            raffle_repository,
            prize_repository,
            prize_template_repository,
            event_repository,
            participant_repository,
        }
    }

    // ===== Raffles =====

    /// Create a raffle for an event; at most one raffle may exist per event
    pub async fn create_raffle(&self, meetup_event_id: &str) -> Result<Raffle> {
        debug!(meetup_event_id = %meetup_event_id, "Creating raffle");

        let event = self.event_repository.find_by_meetup_id(meetup_event_id).await?
            .ok_or_else(|| RaffleBuddyError::MeetupEventNotFound {
                meetup_id: meetup_event_id.to_string(),
            })?;

        if self.raffle_repository.find_by_event_id(event.id).await?.is_some() {
            return Err(RaffleBuddyError::RaffleAlreadyExists {
                meetup_id: meetup_event_id.to_string(),
            });
        }

        let raffle = self.raffle_repository
            .create(CreateRaffleRequest {
                event_id: event.id,
                meetup_event_id: meetup_event_id.to_string(),
            })
            .await?;

        info!(raffle_id = raffle.id, event_id = event.id, "Raffle created");
        Ok(raffle)
    }

    /// Get a raffle by ID
    pub async fn get_raffle_by_id(&self, raffle_id: i64) -> Result<Option<Raffle>> {
        self.raffle_repository.find_by_id(raffle_id).await
    }

    /// Get a raffle by its external Meetup event ID
    pub async fn get_raffle_by_meetup_event_id(&self, meetup_event_id: &str) -> Result<Option<Raffle>> {
        self.raffle_repository.find_by_meetup_event_id(meetup_event_id).await
    }

    /// Get all raffles
    pub async fn get_all_raffles(&self) -> Result<Vec<Raffle>> {
        self.raffle_repository.list_all().await
    }

    /// Delete a raffle (its prizes are removed with it)
    pub async fn delete_raffle(&self, raffle_id: i64) -> Result<()> {
        self.require_raffle(raffle_id).await?;
        self.raffle_repository.delete(raffle_id).await?;

        info!(raffle_id = raffle_id, "Raffle deleted");
        Ok(())
    }

    // ===== Prizes =====

    /// Get a prize by ID
    pub async fn get_prize_by_id(&self, prize_id: i64) -> Result<Option<Prize>> {
        self.prize_repository.find_by_id(prize_id).await
    }

    /// Get all prizes for a raffle
    pub async fn get_prizes_for_raffle(&self, raffle_id: i64) -> Result<Vec<Prize>> {
        self.require_raffle(raffle_id).await?;
        self.prize_repository.find_by_raffle(raffle_id).await
    }

    /// Create a prize for a raffle
    pub async fn create_prize(&self, request: CreatePrizeRequest) -> Result<Prize> {
        self.require_raffle(request.raffle_id).await?;

        let prize = self.prize_repository.create(request).await?;
        info!(prize_id = prize.id, raffle_id = prize.raffle_id, "Prize created");
        Ok(prize)
    }

    /// Update a prize
    pub async fn update_prize(&self, prize_id: i64, request: UpdatePrizeRequest) -> Result<Prize> {
        self.prize_repository.find_by_id(prize_id).await?
            .ok_or(RaffleBuddyError::PrizeNotFound { prize_id })?;

        self.prize_repository.update(prize_id, request).await
    }

    /// Delete a prize
    pub async fn delete_prize(&self, prize_id: i64) -> Result<()> {
        self.prize_repository.find_by_id(prize_id).await?
            .ok_or(RaffleBuddyError::PrizeNotFound { prize_id })?;

        self.prize_repository.delete(prize_id).await?;
        info!(prize_id = prize_id, "Prize deleted");
        Ok(())
    }

    /// Create a prize from a template, overriding the voucher code when given.
    /// The template text is rendered with the raffle date and voucher code;
    /// the winner placeholder stays blank until the prize is awarded.
    pub async fn create_prize_from_template(
        &self,
        template_id: i64,
        raffle_id: i64,
        voucher_code: Option<String>,
    ) -> Result<Prize> {
        let template = self.prize_template_repository.find_by_id(template_id).await?
            .ok_or(RaffleBuddyError::PrizeTemplateNotFound { template_id })?;

        let raffle = self.require_raffle(raffle_id).await?;
        let raffle_date = self.raffle_date(&raffle).await?;

        let mut request = template.to_prize_request(raffle_id);
        if let Some(voucher) = voucher_code {
            if !voucher.trim().is_empty() {
                request.voucher_code = Some(voucher);
            }
        }

        if let Some(template_text) = &request.template_text {
            let ctx = TemplateContext {
                prize_name: &request.name,
                winner_name: None,
                raffle_date: &raffle_date,
                voucher_code: request.voucher_code.as_deref(),
                valid_until: request.valid_until,
            };
            request.template_text = Some(render_template_text(template_text, &ctx));
        }

        let prize = self.prize_repository.create(request).await?;
        info!(
            prize_id = prize.id,
            template_id = template_id,
            raffle_id = raffle_id,
            "Prize created from template"
        );
        Ok(prize)
    }

    /// Award a prize to a participant.
    /// The participant is marked attended and entered, stored as the winner,
    /// and the template text is re-rendered with the winner's name.
    pub async fn award_prize(&self, prize_id: i64, participant_id: i64) -> Result<Prize> {
        let prize = self.prize_repository.find_by_id(prize_id).await?
            .ok_or(RaffleBuddyError::PrizeNotFound { prize_id })?;

        let participant = self.participant_repository.find_details_by_id(participant_id).await?
            .ok_or(RaffleBuddyError::ParticipantNotFound { participant_id })?;

        self.participant_repository
            .set_attendance_and_raffle_entry(participant_id, AttendanceStatus::Attended, true)
            .await?;

        let raffle = self.require_raffle(prize.raffle_id).await?;
        let raffle_date = self.raffle_date(&raffle).await?;

        let rendered = prize.template_text.as_deref().map(|template_text| {
            let ctx = TemplateContext {
                prize_name: &prize.name,
                winner_name: Some(&participant.member_name),
                raffle_date: &raffle_date,
                voucher_code: prize.voucher_code.as_deref(),
                valid_until: prize.valid_until,
            };
            render_template_text(template_text, &ctx)
        });

        let awarded = self.prize_repository
            .set_winner(
                prize_id,
                participant_id,
                &participant.member_name,
                rendered.as_deref(),
            )
            .await?;

        info!(
            prize_id = prize_id,
            participant_id = participant_id,
            winner = %participant.member_name,
            "Prize awarded"
        );
        Ok(awarded)
    }

    // ===== Prize templates =====

    /// Get all prize templates
    pub async fn get_all_prize_templates(&self) -> Result<Vec<PrizeTemplate>> {
        self.prize_template_repository.list_all().await
    }

    /// Get prize templates matching a name pattern
    pub async fn get_prize_templates_by_name(&self, pattern: &str) -> Result<Vec<PrizeTemplate>> {
        self.prize_template_repository.find_by_name_pattern(pattern).await
    }

    /// Get a prize template by ID
    pub async fn get_prize_template_by_id(&self, template_id: i64) -> Result<Option<PrizeTemplate>> {
        self.prize_template_repository.find_by_id(template_id).await
    }

    /// Create a prize template
    pub async fn create_prize_template(&self, request: CreatePrizeTemplateRequest) -> Result<PrizeTemplate> {
        let template = self.prize_template_repository.create(request).await?;
        info!(template_id = template.id, "Prize template created");
        Ok(template)
    }

    /// Update a prize template
    pub async fn update_prize_template(
        &self,
        template_id: i64,
        request: UpdatePrizeTemplateRequest,
    ) -> Result<PrizeTemplate> {
        self.prize_template_repository.find_by_id(template_id).await?
            .ok_or(RaffleBuddyError::PrizeTemplateNotFound { template_id })?;

        self.prize_template_repository.update(template_id, request).await
    }

    /// Delete a prize template
    pub async fn delete_prize_template(&self, template_id: i64) -> Result<()> {
        self.prize_template_repository.find_by_id(template_id).await?
            .ok_or(RaffleBuddyError::PrizeTemplateNotFound { template_id })?;

        self.prize_template_repository.delete(template_id).await?;
        info!(template_id = template_id, "Prize template deleted");
        Ok(())
    }

    async fn require_raffle(&self, raffle_id: i64) -> Result<Raffle> {
        self.raffle_repository.find_by_id(raffle_id).await?
            .ok_or(RaffleBuddyError::RaffleNotFound { raffle_id })
    }

    /// Format the raffle's event date for template rendering
    async fn raffle_date(&self, raffle: &Raffle) -> Result<String> {
        let event = self.event_repository.find_by_id(raffle.event_id).await?;
        Ok(format_raffle_date(event.and_then(|e| e.event_date)))
    }
}

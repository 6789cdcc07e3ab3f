//! Meetup synchronization service implementation
//!
//! This service imports events from the Meetup API, upserts members and
//! participants by their external ids, and owns the participant attendance
//! and raffle-entry transitions used by the admin surface.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::database::repositories::{EventRepository, MemberRepository, ParticipantRepository};
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::models::member::{CreateMemberRequest, UpdateMemberRequest};
use crate::models::participant::{
    AttendanceStatus, CreateParticipantRequest, Participant, ParticipantDetails, RsvpStatus,
};
use crate::services::meetup::{MeetupClient, MeetupEvent, MeetupRsvp};
use crate::utils::errors::{RaffleBuddyError, Result};

/// Outcome of a bulk import run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub failed: Vec<FailedImport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedImport {
    pub meetup_id: String,
    pub error: String,
}

/// Service for Meetup event and RSVP synchronization
#[derive(Debug, Clone)]
pub struct MeetupSyncService {
    meetup_client: MeetupClient,
    event_repository: EventRepository,
    member_repository: MemberRepository,
    participant_repository: ParticipantRepository,
}

impl MeetupSyncService {
    /// Create a new MeetupSyncService instance
    pub fn new(
        meetup_client: MeetupClient,
        event_repository: EventRepository,
        member_repository: MemberRepository,
        participant_repository: ParticipantRepository,
    ) -> Self {
        Self {
            meetup_client,
            event_repository,
            member_repository,
            participant_repository,
        }
    }

    /// List the configured group's events as reported by the external API
    pub async fn get_external_events(&self) -> Result<Vec<MeetupEvent>> {
        debug!("Fetching external events from Meetup");
        self.meetup_client.get_group_events().await
    }

    /// Get all locally stored events
    pub async fn get_all_events(&self) -> Result<Vec<Event>> {
        self.event_repository.list_all().await
    }

    /// Get a locally stored event by ID
    pub async fn get_event_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        self.event_repository.find_by_id(event_id).await
    }

    /// Get a locally stored event by its Meetup ID
    pub async fn get_event_by_meetup_id(&self, meetup_id: &str) -> Result<Option<Event>> {
        self.event_repository.find_by_meetup_id(meetup_id).await
    }

    /// Delete a locally stored event
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        self.event_repository.find_by_id(event_id).await?
            .ok_or(RaffleBuddyError::EventNotFound { event_id })?;

        self.event_repository.delete(event_id).await?;
        info!(event_id = event_id, "Event deleted");
        Ok(())
    }

    /// Import a Meetup event by its external ID and sync its RSVPs.
    /// Returns the stored event and the number of participant rows touched.
    pub async fn import_event(&self, meetup_id: &str) -> Result<(Event, usize)> {
        info!(meetup_id = %meetup_id, "Importing Meetup event");

        let api_event = self.meetup_client.get_event(meetup_id).await?
            .ok_or_else(|| RaffleBuddyError::MeetupEventNotFound {
                meetup_id: meetup_id.to_string(),
            })?;

        let event = self.upsert_event(meetup_id, &api_event).await?;
        let synced = self.sync_event_members(event.id).await?;

        // Re-read so the returned event reflects the latest update timestamp
        let event = self.event_repository.find_by_id(event.id).await?
            .ok_or(RaffleBuddyError::EventNotFound { event_id: event.id })?;

        Ok((event, synced))
    }

    /// Import several Meetup events serially, collecting per-event outcomes
    pub async fn import_events(&self, meetup_ids: &[String]) -> ImportReport {
        let mut report = ImportReport::default();

        for (index, meetup_id) in meetup_ids.iter().enumerate() {
            info!(
                meetup_id = %meetup_id,
                progress = format!("{}/{}", index + 1, meetup_ids.len()),
                "Bulk import progress"
            );

            match self.import_event(meetup_id).await {
                Ok(_) => report.imported.push(meetup_id.clone()),
                Err(e) => {
                    warn!(meetup_id = %meetup_id, error = %e, "Failed to import event");
                    report.failed.push(FailedImport {
                        meetup_id: meetup_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            imported = report.imported.len(),
            failed = report.failed.len(),
            "Bulk import completed"
        );
        report
    }

    /// Sync members and RSVPs for a locally stored event
    pub async fn sync_event_members(&self, event_id: i64) -> Result<usize> {
        let event = self.event_repository.find_by_id(event_id).await?
            .ok_or(RaffleBuddyError::EventNotFound { event_id })?;

        self.sync_members_for_event(&event).await
    }

    /// Sync members and RSVPs for an event by its Meetup ID
    pub async fn sync_event_members_by_meetup_id(&self, meetup_id: &str) -> Result<usize> {
        let event = self.event_repository.find_by_meetup_id(meetup_id).await?
            .ok_or_else(|| RaffleBuddyError::MeetupEventNotFound {
                meetup_id: meetup_id.to_string(),
            })?;

        self.sync_members_for_event(&event).await
    }

    /// Get all participants for an event, joined with member details
    pub async fn get_participants_for_event(&self, event_id: i64) -> Result<Vec<ParticipantDetails>> {
        self.event_repository.find_by_id(event_id).await?
            .ok_or(RaffleBuddyError::EventNotFound { event_id })?;

        self.participant_repository.find_details_by_event(event_id).await
    }

    /// Get raffle-eligible participants for an event
    pub async fn get_raffle_eligible_participants(&self, event_id: i64) -> Result<Vec<ParticipantDetails>> {
        self.event_repository.find_by_id(event_id).await?
            .ok_or(RaffleBuddyError::EventNotFound { event_id })?;

        self.participant_repository.find_raffle_eligible(event_id).await
    }

    /// Get a participant by ID, joined with member details
    pub async fn get_participant_by_id(&self, participant_id: i64) -> Result<Option<ParticipantDetails>> {
        self.participant_repository.find_details_by_id(participant_id).await
    }

    /// Mark a participant as having attended the event
    pub async fn mark_participant_attended(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        let participant = self.participant_repository
            .set_attendance_status(participant_id, AttendanceStatus::Attended)
            .await?;

        info!(participant_id = participant_id, "Participant marked as attended");
        Ok(participant)
    }

    /// Mark a participant as a no-show
    pub async fn mark_participant_no_show(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        let participant = self.participant_repository
            .set_attendance_status(participant_id, AttendanceStatus::NoShow)
            .await?;

        info!(participant_id = participant_id, "Participant marked as no-show");
        Ok(participant)
    }

    /// Reset a participant's attendance status to unknown
    pub async fn reset_participant_attendance(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        let participant = self.participant_repository
            .set_attendance_status(participant_id, AttendanceStatus::Unknown)
            .await?;

        info!(participant_id = participant_id, "Participant attendance reset");
        Ok(participant)
    }

    /// Mark a participant as having entered the raffle
    pub async fn mark_participant_entered_raffle(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        self.participant_repository.set_raffle_entry(participant_id, true).await
    }

    /// Clear a participant's raffle-entry flag
    pub async fn mark_participant_not_entered_raffle(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        self.participant_repository.set_raffle_entry(participant_id, false).await
    }

    /// Mark a participant attended and entered in one step (draw outcome)
    pub async fn mark_participant_attended_and_entered(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        self.participant_repository
            .set_attendance_and_raffle_entry(participant_id, AttendanceStatus::Attended, true)
            .await
    }

    /// Mark a participant no-show and entered in one step (draw outcome)
    pub async fn mark_participant_no_show_and_entered(&self, participant_id: i64) -> Result<Participant> {
        self.require_participant(participant_id).await?;
        self.participant_repository
            .set_attendance_and_raffle_entry(participant_id, AttendanceStatus::NoShow, true)
            .await
    }

    /// Clear the raffle-entry flag for every participant of an event
    pub async fn reset_raffle_entries_for_event(&self, event_id: i64) -> Result<u64> {
        self.event_repository.find_by_id(event_id).await?
            .ok_or(RaffleBuddyError::EventNotFound { event_id })?;

        let reset = self.participant_repository.reset_raffle_entries(event_id).await?;
        info!(event_id = event_id, reset = reset, "Raffle entries reset for event");
        Ok(reset)
    }

    async fn require_participant(&self, participant_id: i64) -> Result<Participant> {
        self.participant_repository.find_by_id(participant_id).await?
            .ok_or(RaffleBuddyError::ParticipantNotFound { participant_id })
    }

    /// Find-or-create the local event row and refresh it from the API payload
    async fn upsert_event(&self, meetup_id: &str, api_event: &MeetupEvent) -> Result<Event> {
        match self.event_repository.find_by_meetup_id(meetup_id).await? {
            Some(existing) => {
                let update = UpdateEventRequest {
                    title: Some(api_event.title.clone()),
                    description: api_event.description.clone(),
                    event_date: api_event.date_time,
                    event_url: api_event.event_url.clone(),
                    status: api_event.status.clone(),
                };
                self.event_repository.update(existing.id, update).await
            }
            None => {
                let create = CreateEventRequest {
                    meetup_id: meetup_id.to_string(),
                    title: api_event.title.clone(),
                    description: api_event.description.clone(),
                    event_date: api_event.date_time,
                    event_url: api_event.event_url.clone(),
                    status: api_event.status.clone(),
                };
                self.event_repository.create(create).await
            }
        }
    }

    /// Fetch the RSVP list for an event and merge it into the local tables
    async fn sync_members_for_event(&self, event: &Event) -> Result<usize> {
        let api_event = self.meetup_client.get_event_with_rsvps(&event.meetup_id).await?
            .ok_or_else(|| RaffleBuddyError::MeetupEventNotFound {
                meetup_id: event.meetup_id.clone(),
            })?;

        let count = self.merge_rsvps(event, &api_event.rsvps).await?;
        info!(
            event_id = event.id,
            meetup_id = %event.meetup_id,
            synced = count,
            "Event members synchronized"
        );
        Ok(count)
    }

    /// Merge the API RSVP list into members and participants.
    /// Participants absent from the list are flagged as declined.
    async fn merge_rsvps(&self, event: &Event, rsvps: &[MeetupRsvp]) -> Result<usize> {
        let existing_participants = self.participant_repository.find_by_event(event.id).await?;

        let mut count = 0usize;
        let mut rsvp_member_ids: HashSet<&str> = HashSet::new();

        for rsvp in rsvps {
            if rsvp.member_id.is_empty() {
                continue;
            }
            rsvp_member_ids.insert(rsvp.member_id.as_str());

            // Find or create the member, refreshing name and email
            let member = match self.member_repository.find_by_meetup_id(&rsvp.member_id).await? {
                Some(existing) => {
                    let update = UpdateMemberRequest {
                        name: Some(rsvp.name.clone()),
                        email: rsvp.email.clone(),
                    };
                    self.member_repository.update(existing.id, update).await?
                }
                None => {
                    let create = CreateMemberRequest {
                        meetup_id: rsvp.member_id.clone(),
                        name: rsvp.name.clone(),
                        email: rsvp.email.clone(),
                    };
                    self.member_repository.create(create).await?
                }
            };

            // Find or create the participant; everyone in the RSVP list is a yes
            match self.participant_repository
                .find_by_event_and_member(event.id, member.id)
                .await?
            {
                Some(existing) => {
                    self.participant_repository
                        .update_rsvp(
                            existing.id,
                            Some(rsvp.rsvp_id.as_str()),
                            RsvpStatus::Yes,
                            rsvp.is_host,
                        )
                        .await?;
                }
                None => {
                    self.participant_repository
                        .create(CreateParticipantRequest {
                            event_id: event.id,
                            member_id: member.id,
                            rsvp_id: Some(rsvp.rsvp_id.clone()),
                            is_organizer: rsvp.is_host,
                            rsvp_status: RsvpStatus::Yes,
                        })
                        .await?;
                }
            }
            count += 1;
        }

        // Flag participants missing from the API response as declined
        for participant in existing_participants {
            let member = self.member_repository.find_by_id(participant.member_id).await?;
            let still_listed = member
                .map(|m| rsvp_member_ids.contains(m.meetup_id.as_str()))
                .unwrap_or(false);

            if !still_listed {
                self.participant_repository
                    .set_rsvp_status(participant.id, RsvpStatus::No)
                    .await?;
                count += 1;
            }
        }

        Ok(count)
    }
}

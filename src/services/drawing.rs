//! Winner drawing service implementation
//!
//! Picks a uniformly random winner among the raffle-eligible participants of
//! a raffle's event. The draw itself mutates nothing; the admin records the
//! outcome through the participant transitions or the award flow.

use rand::Rng;
use tracing::{debug, info};
use crate::database::repositories::{ParticipantRepository, RaffleRepository};
use crate::models::participant::ParticipantDetails;
use crate::utils::errors::{RaffleBuddyError, Result};

/// Service for drawing raffle winners
#[derive(Debug, Clone)]
pub struct DrawingService {
    raffle_repository: RaffleRepository,
    participant_repository: ParticipantRepository,
}

impl DrawingService {
    /// Create a new DrawingService instance
    pub fn new(
        raffle_repository: RaffleRepository,
        participant_repository: ParticipantRepository,
    ) -> Self {
        Self {
            raffle_repository,
            participant_repository,
        }
    }

    /// Get the participants eligible for a raffle's drawing
    pub async fn get_eligible_participants(&self, raffle_id: i64) -> Result<Vec<ParticipantDetails>> {
        let raffle = self.raffle_repository.find_by_id(raffle_id).await?
            .ok_or(RaffleBuddyError::RaffleNotFound { raffle_id })?;

        self.participant_repository.find_raffle_eligible(raffle.event_id).await
    }

    /// Draw a random winner among the eligible participants
    pub async fn draw_winner(&self, raffle_id: i64) -> Result<ParticipantDetails> {
        let eligible = self.get_eligible_participants(raffle_id).await?;
        debug!(raffle_id = raffle_id, eligible = eligible.len(), "Drawing winner");

        let mut rng = rand::thread_rng();
        let winner = choose_winner(&eligible, &mut rng)
            .ok_or(RaffleBuddyError::NoEligibleParticipants { raffle_id })?
            .clone();

        info!(
            raffle_id = raffle_id,
            participant_id = winner.id,
            winner = %winner.member_name,
            eligible = eligible.len(),
            "Raffle winner drawn"
        );
        Ok(winner)
    }
}

/// Choose one participant uniformly at random
fn choose_winner<'a, R: Rng>(
    participants: &'a [ParticipantDetails],
    rng: &mut R,
) -> Option<&'a ParticipantDetails> {
    if participants.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..participants.len());
    participants.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::mock::StepRng;
    use crate::models::participant::{AttendanceStatus, RsvpStatus};

    fn participant(id: i64) -> ParticipantDetails {
        ParticipantDetails {
            id,
            event_id: 1,
            member_id: id,
            member_meetup_id: format!("m-{}", id),
            member_name: format!("Member {}", id),
            member_email: None,
            rsvp_id: None,
            is_organizer: false,
            has_entered_raffle: false,
            rsvp_status: RsvpStatus::Yes.as_str().to_string(),
            attendance_status: AttendanceStatus::Unknown.as_str().to_string(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_choose_winner_empty_list() {
        let mut rng = rand::thread_rng();
        assert!(choose_winner(&[], &mut rng).is_none());
    }

    #[test]
    fn test_choose_winner_single_participant() {
        let participants = vec![participant(42)];
        let mut rng = rand::thread_rng();
        let winner = choose_winner(&participants, &mut rng).unwrap();
        assert_eq!(winner.id, 42);
    }

    #[test]
    fn test_choose_winner_stays_in_bounds() {
        let participants: Vec<_> = (1..=10).map(participant).collect();
        let mut rng = StepRng::new(0, 0x1234_5678_9abc_def0);

        for _ in 0..100 {
            let winner = choose_winner(&participants, &mut rng).unwrap();
            assert!(participants.iter().any(|p| p.id == winner.id));
        }
    }
}

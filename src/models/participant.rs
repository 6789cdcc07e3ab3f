//! Participant model
//!
//! A participant is the join between a member and an event, carrying the
//! RSVP, attendance and raffle-entry state used by the drawing.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: i64,
    pub event_id: i64,
    pub member_id: i64,
    pub rsvp_id: Option<String>,
    pub is_organizer: bool,
    pub has_entered_raffle: bool,
    pub rsvp_status: String,
    pub attendance_status: String,
    pub last_updated: DateTime<Utc>,
}

/// Participant joined with its member, as served to the admin surface
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParticipantDetails {
    pub id: i64,
    pub event_id: i64,
    pub member_id: i64,
    pub member_meetup_id: String,
    pub member_name: String,
    pub member_email: Option<String>,
    pub rsvp_id: Option<String>,
    pub is_organizer: bool,
    pub has_entered_raffle: bool,
    pub rsvp_status: String,
    pub attendance_status: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParticipantRequest {
    pub event_id: i64,
    pub member_id: i64,
    pub rsvp_id: Option<String>,
    pub is_organizer: bool,
    pub rsvp_status: RsvpStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    Yes,
    No,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(RsvpStatus::Yes),
            "no" => Some(RsvpStatus::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Unknown,
    Attended,
    NoShow,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Unknown => "unknown",
            AttendanceStatus::Attended => "attended",
            AttendanceStatus::NoShow => "no_show",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unknown" => Some(AttendanceStatus::Unknown),
            "attended" => Some(AttendanceStatus::Attended),
            "no_show" => Some(AttendanceStatus::NoShow),
            _ => None,
        }
    }
}

impl ParticipantDetails {
    /// Whether this participant may still enter the drawing:
    /// confirmed RSVP, not an organizer, not already entered.
    pub fn is_raffle_eligible(&self) -> bool {
        self.rsvp_status == RsvpStatus::Yes.as_str()
            && !self.is_organizer
            && !self.has_entered_raffle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn details(rsvp: RsvpStatus, organizer: bool, entered: bool) -> ParticipantDetails {
        ParticipantDetails {
            id: 1,
            event_id: 1,
            member_id: 1,
            member_meetup_id: "m-1".to_string(),
            member_name: "Test Member".to_string(),
            member_email: None,
            rsvp_id: Some("r-1".to_string()),
            is_organizer: organizer,
            has_entered_raffle: entered,
            rsvp_status: rsvp.as_str().to_string(),
            attendance_status: AttendanceStatus::Unknown.as_str().to_string(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(RsvpStatus::parse("yes"), Some(RsvpStatus::Yes));
        assert_eq!(RsvpStatus::parse("maybe"), None);
        assert_eq!(AttendanceStatus::parse("no_show"), Some(AttendanceStatus::NoShow));
        assert_eq!(AttendanceStatus::NoShow.as_str(), "no_show");
    }

    #[test]
    fn test_raffle_eligibility() {
        assert!(details(RsvpStatus::Yes, false, false).is_raffle_eligible());
        assert!(!details(RsvpStatus::No, false, false).is_raffle_eligible());
        assert!(!details(RsvpStatus::Yes, true, false).is_raffle_eligible());
        assert!(!details(RsvpStatus::Yes, false, true).is_raffle_eligible());
    }
}

//! Error handling for RaffleBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for RaffleBuddy application
#[derive(Error, Debug)]
pub enum RaffleBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Meetup API error: {0}")]
    Meetup(#[from] MeetupError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Event not found for meetup id: {meetup_id}")]
    MeetupEventNotFound { meetup_id: String },

    #[error("Member not found: {member_id}")]
    MemberNotFound { member_id: i64 },

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: i64 },

    #[error("Raffle not found: {raffle_id}")]
    RaffleNotFound { raffle_id: i64 },

    #[error("A raffle already exists for event: {meetup_id}")]
    RaffleAlreadyExists { meetup_id: String },

    #[error("Prize not found: {prize_id}")]
    PrizeNotFound { prize_id: i64 },

    #[error("Prize template not found: {template_id}")]
    PrizeTemplateNotFound { template_id: i64 },

    #[error("No eligible participants for raffle: {raffle_id}")]
    NoEligibleParticipants { raffle_id: i64 },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Meetup API specific errors
#[derive(Error, Debug)]
pub enum MeetupError {
    #[error("Meetup API request failed: {0}")]
    RequestFailed(String),

    #[error("Meetup API timeout")]
    Timeout,

    #[error("Invalid Meetup response: {0}")]
    InvalidResponse(String),

    #[error("Meetup proxy unavailable")]
    ServiceUnavailable,

    #[error("Access token rejected or missing")]
    Unauthorized,
}

/// Result type alias for RaffleBuddy operations
pub type Result<T> = std::result::Result<T, RaffleBuddyError>;

/// Result type alias for Meetup API operations
pub type MeetupResult<T> = std::result::Result<T, MeetupError>;

impl RaffleBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            RaffleBuddyError::Database(_) => false,
            RaffleBuddyError::Migration(_) => false,
            RaffleBuddyError::Meetup(_) => true,
            RaffleBuddyError::Config(_) => false,
            RaffleBuddyError::PermissionDenied(_) => false,
            RaffleBuddyError::EventNotFound { .. } => false,
            RaffleBuddyError::MeetupEventNotFound { .. } => false,
            RaffleBuddyError::MemberNotFound { .. } => false,
            RaffleBuddyError::ParticipantNotFound { .. } => false,
            RaffleBuddyError::RaffleNotFound { .. } => false,
            RaffleBuddyError::RaffleAlreadyExists { .. } => false,
            RaffleBuddyError::PrizeNotFound { .. } => false,
            RaffleBuddyError::PrizeTemplateNotFound { .. } => false,
            RaffleBuddyError::NoEligibleParticipants { .. } => false,
            RaffleBuddyError::Redis(_) => true,
            RaffleBuddyError::Http(_) => true,
            RaffleBuddyError::Serialization(_) => false,
            RaffleBuddyError::Io(_) => true,
            RaffleBuddyError::UrlParse(_) => false,
            RaffleBuddyError::Authentication(_) => false,
            RaffleBuddyError::InvalidInput(_) => false,
            RaffleBuddyError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RaffleBuddyError::Database(_) => ErrorSeverity::Critical,
            RaffleBuddyError::Migration(_) => ErrorSeverity::Critical,
            RaffleBuddyError::Config(_) => ErrorSeverity::Critical,
            RaffleBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            RaffleBuddyError::Authentication(_) => ErrorSeverity::Warning,
            RaffleBuddyError::RaffleAlreadyExists { .. } => ErrorSeverity::Warning,
            RaffleBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            RaffleBuddyError::NoEligibleParticipants { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors_are_not_recoverable() {
        assert!(!RaffleBuddyError::EventNotFound { event_id: 1 }.is_recoverable());
        assert!(!RaffleBuddyError::ParticipantNotFound { participant_id: 7 }.is_recoverable());
        assert!(!RaffleBuddyError::RaffleNotFound { raffle_id: 3 }.is_recoverable());
    }

    #[test]
    fn test_meetup_errors_are_recoverable() {
        let err = RaffleBuddyError::Meetup(MeetupError::Timeout);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            RaffleBuddyError::Config("missing url".to_string()).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            RaffleBuddyError::RaffleAlreadyExists { meetup_id: "305897255".to_string() }.severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            RaffleBuddyError::InvalidInput("bad".to_string()).severity(),
            ErrorSeverity::Info
        );
    }
}

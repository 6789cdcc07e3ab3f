//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod member;
pub mod participant;
pub mod prize;
pub mod raffle;

// Re-export commonly used models
pub use event::{CreateEventRequest, Event, UpdateEventRequest};
pub use member::{CreateMemberRequest, Member, UpdateMemberRequest};
pub use participant::{
    AttendanceStatus, CreateParticipantRequest, Participant, ParticipantDetails, RsvpStatus,
};
pub use prize::{
    CreatePrizeRequest, CreatePrizeTemplateRequest, Prize, PrizeTemplate, TemplateContext,
    UpdatePrizeRequest, UpdatePrizeTemplateRequest,
};
pub use raffle::{CreateRaffleRequest, Raffle};

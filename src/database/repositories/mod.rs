//! Database repositories module
//!
//! One repository per table, each holding a cloned connection pool

pub mod event;
pub mod member;
pub mod participant;
pub mod prize;
pub mod prize_template;
pub mod raffle;

pub use event::EventRepository;
pub use member::MemberRepository;
pub use participant::ParticipantRepository;
pub use prize::PrizeRepository;
pub use prize_template::PrizeTemplateRepository;
pub use raffle::RaffleRepository;

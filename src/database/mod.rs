//! Database module
//!
//! This module handles database connections, migrations, and repositories

pub mod connection;
pub mod repositories;
pub mod service;

pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use repositories::{
    EventRepository, MemberRepository, ParticipantRepository, PrizeRepository,
    PrizeTemplateRepository, RaffleRepository,
};
pub use service::DatabaseService;

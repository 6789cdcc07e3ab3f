//! Services module
//!
//! This module contains business logic services

pub mod drawing;
pub mod meetup;
pub mod meetup_mock;
pub mod member;
pub mod raffle;
pub mod redis;
pub mod sample_data;
pub mod sync;

// Re-export commonly used services
pub use drawing::DrawingService;
pub use meetup::{MeetupClient, MeetupEvent, MeetupEventWithRsvps, MeetupRsvp};
pub use member::MemberService;
pub use raffle::RaffleService;
pub use redis::RedisService;
pub use sample_data::SampleDataService;
pub use sync::{ImportReport, MeetupSyncService};

use crate::config::settings::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub sync_service: MeetupSyncService,
    pub member_service: MemberService,
    pub raffle_service: RaffleService,
    pub drawing_service: DrawingService,
    pub sample_data_service: SampleDataService,
    pub redis_service: RedisService,
    pub meetup_client: MeetupClient,
    pub database: DatabaseService,
    db_pool: DatabasePool,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, db_pool: DatabasePool) -> Result<Self> {
        let database = DatabaseService::new(db_pool.clone());
        let redis_service = RedisService::new(settings.clone())?;
        let meetup_client = MeetupClient::from_settings(&settings, redis_service.clone())?;

        let sync_service = MeetupSyncService::new(
            meetup_client.clone(),
            database.events.clone(),
            database.members.clone(),
            database.participants.clone(),
        );
        let member_service = MemberService::new(database.members.clone());
        let raffle_service = RaffleService::new(
            database.raffles.clone(),
            database.prizes.clone(),
            database.prize_templates.clone(),
            database.events.clone(),
            database.participants.clone(),
        );
        let drawing_service = DrawingService::new(
            database.raffles.clone(),
            database.participants.clone(),
        );
        let sample_data_service = SampleDataService::new(database.clone());

        Ok(Self {
            sync_service,
            member_service,
            raffle_service,
            drawing_service,
            sample_data_service,
            redis_service,
            meetup_client,
            database,
            db_pool,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = crate::database::health_check(&self.db_pool).await.is_ok();
        let redis_healthy = self.redis_service.health_check().await.unwrap_or(false);

        ServiceHealthStatus {
            database_healthy,
            redis_healthy,
            meetup_mock: self.meetup_client.is_mock(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub redis_healthy: bool,
    pub meetup_mock: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy && self.redis_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if !self.redis_healthy {
            issues.push("Redis connection failed".to_string());
        }

        issues
    }
}

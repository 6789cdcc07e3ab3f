//! Database service layer
//!
//! This module provides a high-level interface to database operations

use serde_json::json;
use crate::database::{
    DatabasePool, EventRepository, MemberRepository, ParticipantRepository, PrizeRepository,
    PrizeTemplateRepository, RaffleRepository,
};
use crate::utils::errors::RaffleBuddyError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub members: MemberRepository,
    pub participants: ParticipantRepository,
    pub raffles: RaffleRepository,
    pub prizes: PrizeRepository,
    pub prize_templates: PrizeTemplateRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            raffles: RaffleRepository::new(pool.clone()),
            prizes: PrizeRepository::new(pool.clone()),
            prize_templates: PrizeTemplateRepository::new(pool),
        }
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<serde_json::Value, RaffleBuddyError> {
        let events = self.events.count().await?;
        let members = self.members.count().await?;
        let raffles = self.raffles.count().await?;
        let prize_templates = self.prize_templates.count().await?;

        Ok(json!({
            "events": events,
            "members": members,
            "raffles": raffles,
            "prize_templates": prize_templates,
        }))
    }
}

//! Member service implementation
//!
//! Admin-side member management. Members are usually created by the RSVP
//! synchronization; these operations cover manual corrections.

use tracing::{debug, info};
use crate::database::repositories::MemberRepository;
use crate::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::utils::errors::{RaffleBuddyError, Result};

/// Service for managing members
#[derive(Debug, Clone)]
pub struct MemberService {
    member_repository: MemberRepository,
}

impl MemberService {
    /// Create a new MemberService instance
    pub fn new(member_repository: MemberRepository) -> Self {
        Self { member_repository }
    }

    /// Get a member by ID
    pub async fn get_member_by_id(&self, member_id: i64) -> Result<Option<Member>> {
        self.member_repository.find_by_id(member_id).await
    }

    /// Get a member by its external Meetup ID
    pub async fn get_member_by_meetup_id(&self, meetup_id: &str) -> Result<Option<Member>> {
        self.member_repository.find_by_meetup_id(meetup_id).await
    }

    /// List members with pagination
    pub async fn list_members(&self, limit: i64, offset: i64) -> Result<Vec<Member>> {
        debug!(limit = limit, offset = offset, "Listing members");

        if limit > 100 {
            return Err(RaffleBuddyError::InvalidInput(
                "Limit cannot exceed 100".to_string()
            ));
        }

        self.member_repository.list(limit, offset).await
    }

    /// Create a member manually
    pub async fn create_member(&self, request: CreateMemberRequest) -> Result<Member> {
        if request.name.trim().is_empty() {
            return Err(RaffleBuddyError::InvalidInput(
                "Member name must not be empty".to_string()
            ));
        }

        if self.member_repository.find_by_meetup_id(&request.meetup_id).await?.is_some() {
            return Err(RaffleBuddyError::InvalidInput(format!(
                "A member with meetup id {} already exists",
                request.meetup_id
            )));
        }

        let member = self.member_repository.create(request).await?;
        info!(member_id = member.id, "Member created");
        Ok(member)
    }

    /// Update a member
    pub async fn update_member(&self, member_id: i64, request: UpdateMemberRequest) -> Result<Member> {
        self.member_repository.find_by_id(member_id).await?
            .ok_or(RaffleBuddyError::MemberNotFound { member_id })?;

        let member = self.member_repository.update(member_id, request).await?;
        info!(member_id = member_id, "Member updated");
        Ok(member)
    }

    /// Delete a member (their participations are removed with them)
    pub async fn delete_member(&self, member_id: i64) -> Result<()> {
        self.member_repository.find_by_id(member_id).await?
            .ok_or(RaffleBuddyError::MemberNotFound { member_id })?;

        self.member_repository.delete(member_id).await?;
        info!(member_id = member_id, "Member deleted");
        Ok(())
    }

    /// Count all members
    pub async fn count_members(&self) -> Result<i64> {
        self.member_repository.count().await
    }
}

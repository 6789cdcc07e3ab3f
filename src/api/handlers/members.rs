//! Member handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use crate::api::AppState;
use crate::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::utils::errors::{RaffleBuddyError, Result};

#[derive(Debug, Deserialize)]
pub struct MemberListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List members with pagination
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<MemberListQuery>,
) -> Result<Json<Vec<Member>>> {
    let members = state.services.member_service
        .list_members(query.limit.unwrap_or(50), query.offset.unwrap_or(0))
        .await?;

    Ok(Json(members))
}

/// Create a member manually
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>)> {
    let member = state.services.member_service.create_member(request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Get one member
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Result<Json<Member>> {
    let member = state.services.member_service.get_member_by_id(member_id).await?
        .ok_or(RaffleBuddyError::MemberNotFound { member_id })?;

    Ok(Json(member))
}

/// Update a member
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<Member>> {
    let member = state.services.member_service.update_member(member_id, request).await?;
    Ok(Json(member))
}

/// Delete a member
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.member_service.delete_member(member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Participant handlers
//!
//! Attendance and raffle-entry transitions for single participants, plus
//! per-event participant listings.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use crate::api::AppState;
use crate::models::participant::{Participant, ParticipantDetails};
use crate::utils::errors::{RaffleBuddyError, Result};

/// List all participants of an event
pub async fn list_participants(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<ParticipantDetails>>> {
    let participants = state.services.sync_service
        .get_participants_for_event(event_id)
        .await?;

    Ok(Json(participants))
}

/// List the raffle-eligible participants of an event
pub async fn list_eligible_participants(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<ParticipantDetails>>> {
    let participants = state.services.sync_service
        .get_raffle_eligible_participants(event_id)
        .await?;

    Ok(Json(participants))
}

/// Get one participant with member details
pub async fn get_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<ParticipantDetails>> {
    let participant = state.services.sync_service
        .get_participant_by_id(participant_id)
        .await?
        .ok_or(RaffleBuddyError::ParticipantNotFound { participant_id })?;

    Ok(Json(participant))
}

/// Mark a participant as attended
pub async fn mark_attended(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .mark_participant_attended(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Mark a participant as a no-show
pub async fn mark_no_show(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .mark_participant_no_show(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Reset a participant's attendance status
pub async fn reset_attendance(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .reset_participant_attendance(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Mark a participant as entered into the raffle
pub async fn enter_raffle(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .mark_participant_entered_raffle(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Clear a participant's raffle-entry flag
pub async fn withdraw_raffle(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .mark_participant_not_entered_raffle(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Mark a participant attended and entered in one step (draw outcome)
pub async fn mark_attended_entered(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .mark_participant_attended_and_entered(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Mark a participant no-show and entered in one step (draw outcome)
pub async fn mark_no_show_entered(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    let participant = state.services.sync_service
        .mark_participant_no_show_and_entered(participant_id)
        .await?;

    Ok(Json(participant))
}

/// Clear the raffle-entry flag for every participant of an event
pub async fn reset_raffle_entries(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Value>> {
    let reset = state.services.sync_service
        .reset_raffle_entries_for_event(event_id)
        .await?;

    Ok(Json(json!({ "reset_participants": reset })))
}

//! Drawing handlers
//!
//! The draw endpoint picks a random winner among the eligible participants
//! and mutates nothing; the admin then records the outcome through the
//! participant transitions or the award flow.

use axum::extract::{Path, State};
use axum::Json;
use crate::api::AppState;
use crate::models::participant::ParticipantDetails;
use crate::utils::errors::Result;

/// List the eligible participants of a raffle
pub async fn list_eligible(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
) -> Result<Json<Vec<ParticipantDetails>>> {
    let participants = state.services.drawing_service
        .get_eligible_participants(raffle_id)
        .await?;

    Ok(Json(participants))
}

/// Draw a random winner for a raffle
pub async fn draw_winner(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
) -> Result<Json<ParticipantDetails>> {
    let winner = state.services.drawing_service.draw_winner(raffle_id).await?;
    Ok(Json(winner))
}

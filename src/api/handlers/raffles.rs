//! Raffle handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use crate::api::AppState;
use crate::models::raffle::Raffle;
use crate::utils::errors::{RaffleBuddyError, Result};

#[derive(Debug, Deserialize)]
pub struct CreateRaffleBody {
    pub meetup_event_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RaffleQuery {
    pub meetup_event_id: Option<String>,
}

/// List raffles, optionally filtered by external Meetup event ID
pub async fn list_raffles(
    State(state): State<AppState>,
    Query(query): Query<RaffleQuery>,
) -> Result<Json<Vec<Raffle>>> {
    let raffles = match query.meetup_event_id {
        Some(meetup_event_id) => state.services.raffle_service
            .get_raffle_by_meetup_event_id(&meetup_event_id)
            .await?
            .into_iter()
            .collect(),
        None => state.services.raffle_service.get_all_raffles().await?,
    };

    Ok(Json(raffles))
}

/// Create a raffle for an event
pub async fn create_raffle(
    State(state): State<AppState>,
    Json(body): Json<CreateRaffleBody>,
) -> Result<(StatusCode, Json<Raffle>)> {
    if body.meetup_event_id.trim().is_empty() {
        return Err(RaffleBuddyError::InvalidInput(
            "meetup_event_id must not be empty".to_string()
        ));
    }

    let raffle = state.services.raffle_service
        .create_raffle(&body.meetup_event_id)
        .await?;

    Ok((StatusCode::CREATED, Json(raffle)))
}

/// Get one raffle
pub async fn get_raffle(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
) -> Result<Json<Raffle>> {
    let raffle = state.services.raffle_service.get_raffle_by_id(raffle_id).await?
        .ok_or(RaffleBuddyError::RaffleNotFound { raffle_id })?;

    Ok(Json(raffle))
}

/// Delete a raffle
pub async fn delete_raffle(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.raffle_service.delete_raffle(raffle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Prize handlers
//!
//! Prize CRUD within a raffle, template instantiation, and the award flow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use crate::api::AppState;
use crate::models::prize::{CreatePrizeRequest, Prize, UpdatePrizeRequest};
use crate::utils::errors::{RaffleBuddyError, Result};

#[derive(Debug, Deserialize)]
pub struct CreatePrizeBody {
    pub name: String,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct FromTemplateBody {
    pub template_id: i64,
    pub voucher_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AwardPrizeBody {
    pub participant_id: i64,
}

/// List all prizes of a raffle
pub async fn list_prizes(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
) -> Result<Json<Vec<Prize>>> {
    let prizes = state.services.raffle_service.get_prizes_for_raffle(raffle_id).await?;
    Ok(Json(prizes))
}

/// Create a prize for a raffle
pub async fn create_prize(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
    Json(body): Json<CreatePrizeBody>,
) -> Result<(StatusCode, Json<Prize>)> {
    if body.name.trim().is_empty() {
        return Err(RaffleBuddyError::InvalidInput(
            "Prize name must not be empty".to_string()
        ));
    }

    let prize = state.services.raffle_service
        .create_prize(CreatePrizeRequest {
            raffle_id,
            name: body.name,
            description: body.description,
            template_text: body.template_text,
            voucher_code: body.voucher_code,
            valid_until: body.valid_until,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(prize)))
}

/// Create a prize for a raffle by copying a template
pub async fn create_prize_from_template(
    State(state): State<AppState>,
    Path(raffle_id): Path<i64>,
    Json(body): Json<FromTemplateBody>,
) -> Result<(StatusCode, Json<Prize>)> {
    let prize = state.services.raffle_service
        .create_prize_from_template(body.template_id, raffle_id, body.voucher_code)
        .await?;

    Ok((StatusCode::CREATED, Json(prize)))
}

/// Get one prize
pub async fn get_prize(
    State(state): State<AppState>,
    Path(prize_id): Path<i64>,
) -> Result<Json<Prize>> {
    let prize = state.services.raffle_service.get_prize_by_id(prize_id).await?
        .ok_or(RaffleBuddyError::PrizeNotFound { prize_id })?;

    Ok(Json(prize))
}

/// Update a prize
pub async fn update_prize(
    State(state): State<AppState>,
    Path(prize_id): Path<i64>,
    Json(request): Json<UpdatePrizeRequest>,
) -> Result<Json<Prize>> {
    let prize = state.services.raffle_service.update_prize(prize_id, request).await?;
    Ok(Json(prize))
}

/// Delete a prize
pub async fn delete_prize(
    State(state): State<AppState>,
    Path(prize_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.raffle_service.delete_prize(prize_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Award a prize to a participant
pub async fn award_prize(
    State(state): State<AppState>,
    Path(prize_id): Path<i64>,
    Json(body): Json<AwardPrizeBody>,
) -> Result<Json<Prize>> {
    let prize = state.services.raffle_service
        .award_prize(prize_id, body.participant_id)
        .await?;

    Ok(Json(prize))
}

//! Tournament API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chess_tracker::roster::{Tournament, TournamentId};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{AppState, ErrorResponse, store_error_response};

#[derive(Debug, Deserialize)]
pub struct TournamentPayload {
    pub date: NaiveDate,
}

/// List all tournaments, most recent first.
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tournament>>, (StatusCode, Json<ErrorResponse>)> {
    let tournaments = state
        .roster_manager
        .list_tournaments()
        .await
        .map_err(store_error_response)?;
    Ok(Json(tournaments))
}

/// Create a tournament on a date no other tournament uses.
///
/// # Errors
///
/// - `409 Conflict`: A tournament already exists on this date
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(payload): Json<TournamentPayload>,
) -> Result<(StatusCode, Json<Tournament>), (StatusCode, Json<ErrorResponse>)> {
    let tournament = state
        .roster_manager
        .add_tournament(payload.date)
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

/// Move a tournament to a new (still unique) date.
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
    Json(payload): Json<TournamentPayload>,
) -> Result<Json<Tournament>, (StatusCode, Json<ErrorResponse>)> {
    let tournament = state
        .roster_manager
        .set_tournament_date(tournament_id, payload.date)
        .await
        .map_err(store_error_response)?;
    Ok(Json(tournament))
}

/// Delete a tournament together with its recorded points.
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .roster_manager
        .delete_tournament(tournament_id)
        .await
        .map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

//! Point entry API handlers.
//!
//! Each entry records one player's score in one tournament; a pair can have
//! at most one entry. Scores must be non-negative multiples of 0.5.
//!
//! # Examples
//!
//! Record a score:
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/results \
//!   -H "Authorization: Bearer TOKEN" \
//!   -H "Content-Type: application/json" \
//!   -d '{"tournament_id": 1, "player_id": 2, "points": 7.5, "category": "A"}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chess_tracker::roster::{PlayerId, TournamentId};
use chess_tracker::scoring::{Category, Point, PointId, PointRow};
use serde::Deserialize;

use super::{AppState, ErrorResponse, store_error_response};

#[derive(Debug, Deserialize)]
pub struct ListResultsParams {
    pub tournament_id: TournamentId,
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct RecordResultsPayload {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub points: f64,
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResultsPayload {
    pub points: f64,
    pub category: Category,
}

/// List a tournament's entries with player names, best score first.
///
/// Optionally filtered to one category via `?category=A`.
pub async fn list_results(
    State(state): State<AppState>,
    Query(params): Query<ListResultsParams>,
) -> Result<Json<Vec<PointRow>>, (StatusCode, Json<ErrorResponse>)> {
    let rows = state
        .scoring_manager
        .points_for_tournament(params.tournament_id, params.category)
        .await
        .map_err(store_error_response)?;
    Ok(Json(rows))
}

/// Record a player's score in a tournament.
///
/// # Errors
///
/// - `400 Bad Request`: Score negative or not in 0.5 increments
/// - `404 Not Found`: Unknown player or tournament id
/// - `409 Conflict`: The player already has an entry in this tournament
pub async fn record_results(
    State(state): State<AppState>,
    Json(payload): Json<RecordResultsPayload>,
) -> Result<(StatusCode, Json<Point>), (StatusCode, Json<ErrorResponse>)> {
    let point = state
        .scoring_manager
        .record_points(
            payload.tournament_id,
            payload.player_id,
            payload.points,
            payload.category,
        )
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(point)))
}

/// Change the score or category of an existing entry.
pub async fn update_results(
    State(state): State<AppState>,
    Path(point_id): Path<PointId>,
    Json(payload): Json<UpdateResultsPayload>,
) -> Result<Json<Point>, (StatusCode, Json<ErrorResponse>)> {
    let point = state
        .scoring_manager
        .update_points(point_id, payload.points, payload.category)
        .await
        .map_err(store_error_response)?;
    Ok(Json(point))
}

/// Remove one entry from a tournament's results.
///
/// The player and tournament records are untouched.
pub async fn delete_results(
    State(state): State<AppState>,
    Path(point_id): Path<PointId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .scoring_manager
        .delete_points(point_id)
        .await
        .map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

//! Ranking and progression API handlers.
//!
//! Responses carry both the structured entries and the parallel
//! `labels`/`data` arrays consumed by the charting frontend.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chess_tracker::ranking::{ChartSeries, ClassificationEntry, LeaderboardEntry};
use chess_tracker::roster::{PlayerId, TournamentId};
use chess_tracker::scoring::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse, store_error_response};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub category: Category,
    pub top: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub tournament_id: TournamentId,
    pub tournament_date: NaiveDate,
    pub category: Category,
    pub entries: Vec<LeaderboardEntry>,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ClassificationParams {
    pub year: Option<i32>,
    pub top: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ClassificationResponse {
    pub year: Option<i32>,
    pub entries: Vec<ClassificationEntry>,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressionPayload {
    pub player_ids: Vec<PlayerId>,
}

#[derive(Debug, Serialize)]
pub struct ProgressionSeriesResponse {
    pub player_id: PlayerId,
    pub display_name: String,
    pub dates: Vec<NaiveDate>,
    pub points: Vec<f64>,
}

/// Leaderboard for one tournament and category, best score first.
///
/// `?top=N` truncates to the N best entries; ties keep insertion order.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament id
pub async fn tournament_leaderboard(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, (StatusCode, Json<ErrorResponse>)> {
    let tournament = state
        .roster_manager
        .get_tournament(tournament_id)
        .await
        .map_err(store_error_response)?;

    let entries = state
        .ranking_manager
        .tournament_leaderboard(tournament_id, params.category, params.top)
        .await
        .map_err(store_error_response)?;

    let chart = ChartSeries::from_leaderboard(&entries);
    Ok(Json(LeaderboardResponse {
        tournament_id,
        tournament_date: tournament.held_on,
        category: params.category,
        entries,
        labels: chart.labels,
        data: chart.data,
    }))
}

/// General classification: total points per player, optionally restricted to
/// one calendar year via `?year=`.
///
/// A year with no scored tournaments yields empty arrays, not an error.
pub async fn general_classification(
    State(state): State<AppState>,
    Query(params): Query<ClassificationParams>,
) -> Result<Json<ClassificationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let entries = state
        .ranking_manager
        .general_classification(params.year, params.top)
        .await
        .map_err(store_error_response)?;

    let chart = ChartSeries::from_classification(&entries);
    Ok(Json(ClassificationResponse {
        year: params.year,
        entries,
        labels: chart.labels,
        data: chart.data,
    }))
}

/// Per-player score series across tournaments, ordered by ascending date.
///
/// # Errors
///
/// - `400 Bad Request`: Empty player selection
/// - `404 Not Found`: A requested player id does not exist
pub async fn progression(
    State(state): State<AppState>,
    Json(payload): Json<ProgressionPayload>,
) -> Result<Json<Vec<ProgressionSeriesResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let series = state
        .ranking_manager
        .progression(&payload.player_ids)
        .await
        .map_err(store_error_response)?;

    let response = series
        .into_iter()
        .map(|s| ProgressionSeriesResponse {
            player_id: s.player_id,
            display_name: s.display_name,
            dates: s.entries.iter().map(|e| e.held_on).collect(),
            points: s.entries.iter().map(|e| e.points).collect(),
        })
        .collect();

    Ok(Json(response))
}

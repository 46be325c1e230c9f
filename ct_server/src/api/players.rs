//! Player roster API handlers.
//!
//! Names are normalized server-side, so `"jérôme"` and `"JEROME"` collide on
//! the same stored player.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chess_tracker::roster::{Player, PlayerId};
use serde::Deserialize;

use super::{AppState, ErrorResponse, store_error_response};

#[derive(Debug, Deserialize)]
pub struct PlayerPayload {
    pub first_name: String,
    pub last_name: String,
}

/// List all players ordered by last name, then first name.
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Player>>, (StatusCode, Json<ErrorResponse>)> {
    let players = state
        .roster_manager
        .list_players()
        .await
        .map_err(store_error_response)?;
    Ok(Json(players))
}

/// Register a new player.
///
/// # Errors
///
/// - `400 Bad Request`: A name field is empty after normalization
/// - `409 Conflict`: The normalized name pair already exists
pub async fn create_player(
    State(state): State<AppState>,
    Json(payload): Json<PlayerPayload>,
) -> Result<(StatusCode, Json<Player>), (StatusCode, Json<ErrorResponse>)> {
    let player = state
        .roster_manager
        .add_player(&payload.first_name, &payload.last_name)
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Rename a player, re-normalizing both name fields.
pub async fn rename_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
    Json(payload): Json<PlayerPayload>,
) -> Result<Json<Player>, (StatusCode, Json<ErrorResponse>)> {
    let player = state
        .roster_manager
        .rename_player(player_id, &payload.first_name, &payload.last_name)
        .await
        .map_err(store_error_response)?;
    Ok(Json(player))
}

/// Delete a player.
///
/// # Errors
///
/// - `404 Not Found`: Unknown player id
/// - `409 Conflict`: The player still has recorded points
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .roster_manager
        .delete_player(player_id)
        .await
        .map_err(store_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

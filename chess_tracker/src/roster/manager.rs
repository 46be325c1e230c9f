//! Roster manager implementation.

use super::models::{Player, PlayerId, Tournament, TournamentId};
use crate::db::errors::{StoreError, StoreResult, fk_violation, unique_violation};
use crate::names::normalize_name;
use chrono::NaiveDate;
use log::info;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Manager for player and tournament records.
///
/// All mutations are single statements; uniqueness and deletion rules are
/// enforced by the database constraints, so a constraint race between two
/// concurrent requests resolves to one success and one reported error.
#[derive(Clone)]
pub struct RosterManager {
    pool: Arc<PgPool>,
}

impl RosterManager {
    /// Create a new roster manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Register a new player.
    ///
    /// Both name fields are normalized before storage. An empty result after
    /// normalization is rejected; a duplicate normalized pair fails with
    /// [`StoreError::PlayerNameTaken`].
    pub async fn add_player(&self, first_name: &str, last_name: &str) -> StoreResult<Player> {
        let (first_name, last_name) = normalized_pair(first_name, last_name)?;

        let row = sqlx::query(
            "INSERT INTO players (first_name, last_name) VALUES ($1, $2)
             RETURNING id, first_name, last_name",
        )
        .bind(&first_name)
        .bind(&last_name)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_player_insert_err)?;

        let player = player_from_row(&row);
        info!("Added player {} ({})", player.display_name(), player.id);
        Ok(player)
    }

    /// Rename a player, re-normalizing both fields.
    pub async fn rename_player(
        &self,
        player_id: PlayerId,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Player> {
        let (first_name, last_name) = normalized_pair(first_name, last_name)?;

        let row = sqlx::query(
            "UPDATE players SET first_name = $2, last_name = $3 WHERE id = $1
             RETURNING id, first_name, last_name",
        )
        .bind(player_id)
        .bind(&first_name)
        .bind(&last_name)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_player_insert_err)?
        .ok_or(StoreError::PlayerNotFound)?;

        Ok(player_from_row(&row))
    }

    /// Delete a player.
    ///
    /// # Errors
    ///
    /// * [`StoreError::PlayerHasPoints`] - The player still has point entries
    /// * [`StoreError::PlayerNotFound`] - Unknown player id
    pub async fn delete_player(&self, player_id: PlayerId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|err| {
                if fk_violation(&err).is_some() {
                    StoreError::PlayerHasPoints
                } else {
                    StoreError::Database(err)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::PlayerNotFound);
        }
        Ok(())
    }

    /// Fetch a single player by id.
    pub async fn get_player(&self, player_id: PlayerId) -> StoreResult<Player> {
        let row = sqlx::query("SELECT id, first_name, last_name FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::PlayerNotFound)?;

        Ok(player_from_row(&row))
    }

    /// List all players ordered by last name, then first name.
    pub async fn list_players(&self) -> StoreResult<Vec<Player>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name FROM players ORDER BY last_name, first_name",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    /// Create a tournament on the given date.
    pub async fn add_tournament(&self, held_on: NaiveDate) -> StoreResult<Tournament> {
        let row = sqlx::query(
            "INSERT INTO tournaments (held_on) VALUES ($1) RETURNING id, held_on",
        )
        .bind(held_on)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_tournament_insert_err)?;

        let tournament = tournament_from_row(&row);
        info!("Added tournament on {} ({})", tournament.held_on, tournament.id);
        Ok(tournament)
    }

    /// Move a tournament to a new date, which must remain unique.
    pub async fn set_tournament_date(
        &self,
        tournament_id: TournamentId,
        held_on: NaiveDate,
    ) -> StoreResult<Tournament> {
        let row = sqlx::query(
            "UPDATE tournaments SET held_on = $2 WHERE id = $1 RETURNING id, held_on",
        )
        .bind(tournament_id)
        .bind(held_on)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_tournament_insert_err)?
        .ok_or(StoreError::TournamentNotFound)?;

        Ok(tournament_from_row(&row))
    }

    /// Delete a tournament together with its point entries (cascade).
    pub async fn delete_tournament(&self, tournament_id: TournamentId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::TournamentNotFound);
        }
        Ok(())
    }

    /// Fetch a single tournament by id.
    pub async fn get_tournament(&self, tournament_id: TournamentId) -> StoreResult<Tournament> {
        let row = sqlx::query("SELECT id, held_on FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::TournamentNotFound)?;

        Ok(tournament_from_row(&row))
    }

    /// List all tournaments, most recent first.
    pub async fn list_tournaments(&self) -> StoreResult<Vec<Tournament>> {
        let rows = sqlx::query("SELECT id, held_on FROM tournaments ORDER BY held_on DESC")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.iter().map(tournament_from_row).collect())
    }
}

/// Normalize a name pair, rejecting fields that normalize to nothing.
fn normalized_pair(first_name: &str, last_name: &str) -> StoreResult<(String, String)> {
    let first_name = normalize_name(first_name);
    if first_name.is_empty() {
        return Err(StoreError::MissingField("first_name"));
    }
    let last_name = normalize_name(last_name);
    if last_name.is_empty() {
        return Err(StoreError::MissingField("last_name"));
    }
    Ok((first_name, last_name))
}

fn map_player_insert_err(err: sqlx::Error) -> StoreError {
    match unique_violation(&err).as_deref() {
        Some("uq_players_name") => StoreError::PlayerNameTaken,
        _ => StoreError::Database(err),
    }
}

fn map_tournament_insert_err(err: sqlx::Error) -> StoreError {
    match unique_violation(&err).as_deref() {
        Some("uq_tournaments_date") => StoreError::TournamentDateTaken,
        _ => StoreError::Database(err),
    }
}

fn player_from_row(row: &sqlx::postgres::PgRow) -> Player {
    Player {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    }
}

fn tournament_from_row(row: &sqlx::postgres::PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        held_on: row.get("held_on"),
    }
}

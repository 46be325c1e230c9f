//! Ranking manager: leaderboards, general classification, and progressions.

use super::models::{
    ClassificationEntry, LeaderboardEntry, ProgressionEntry, ProgressionSeries,
};
use crate::db::errors::{StoreError, StoreResult};
use crate::db::timeouts::with_default_timeout;
use crate::roster::{PlayerId, TournamentId};
use crate::scoring::Category;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only aggregation queries over the roster and scoring tables.
#[derive(Clone)]
pub struct RankingManager {
    pool: Arc<PgPool>,
}

impl RankingManager {
    /// Create a new ranking manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Leaderboard for one tournament and category, best score first.
    ///
    /// Ties keep insertion order (secondary order by row id). `top_n` limits
    /// the result when given; `None` returns the full board.
    ///
    /// # Errors
    ///
    /// * [`StoreError::TournamentNotFound`] - Unknown tournament id
    pub async fn tournament_leaderboard(
        &self,
        tournament_id: TournamentId,
        category: Category,
        top_n: Option<i64>,
    ) -> StoreResult<Vec<LeaderboardEntry>> {
        let exists = sqlx::query("SELECT id FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if exists.is_none() {
            return Err(StoreError::TournamentNotFound);
        }

        let rows = with_default_timeout(
            sqlx::query(
                "SELECT pt.player_id, pl.first_name, pl.last_name, pt.points
                 FROM points pt
                 JOIN players pl ON pl.id = pt.player_id
                 WHERE pt.tournament_id = $1 AND pt.category = $2
                 ORDER BY pt.points DESC, pt.id ASC
                 LIMIT $3",
            )
            .bind(tournament_id)
            .bind(category.as_str())
            .bind(top_n)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows
            .iter()
            .map(|row| LeaderboardEntry {
                player_id: row.get("player_id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                points: row.get("points"),
            })
            .collect())
    }

    /// General classification: total points per player across tournaments.
    ///
    /// When `year` is given only tournaments held in that calendar year
    /// count; a year with no scored tournaments yields an empty list.
    /// Players without any qualifying points are absent rather than listed
    /// with zero.
    pub async fn general_classification(
        &self,
        year: Option<i32>,
        top_n: Option<i64>,
    ) -> StoreResult<Vec<ClassificationEntry>> {
        let rows = with_default_timeout(
            sqlx::query(
                "SELECT pl.id AS player_id, pl.first_name, pl.last_name,
                        SUM(pt.points) AS total_points
                 FROM points pt
                 JOIN players pl ON pl.id = pt.player_id
                 JOIN tournaments t ON t.id = pt.tournament_id
                 WHERE $1::INT4 IS NULL OR date_part('year', t.held_on)::INT4 = $1
                 GROUP BY pl.id, pl.first_name, pl.last_name
                 ORDER BY total_points DESC, pl.id ASC
                 LIMIT $2",
            )
            .bind(year)
            .bind(top_n)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows
            .iter()
            .map(|row| ClassificationEntry {
                player_id: row.get("player_id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                total_points: row.get("total_points"),
            })
            .collect())
    }

    /// Per-player score series across tournaments, ordered by ascending date.
    ///
    /// The selection must be non-empty and every id must refer to an existing
    /// player (ids are checked against the roster before querying scores).
    /// Duplicated ids are collapsed; players without points yield an empty
    /// series.
    ///
    /// # Errors
    ///
    /// * [`StoreError::EmptySelection`] - No player ids given
    /// * [`StoreError::PlayerNotFound`] - A requested id does not exist
    pub async fn progression(
        &self,
        player_ids: &[PlayerId],
    ) -> StoreResult<Vec<ProgressionSeries>> {
        if player_ids.is_empty() {
            return Err(StoreError::EmptySelection);
        }

        let mut requested = Vec::with_capacity(player_ids.len());
        for &id in player_ids {
            if !requested.contains(&id) {
                requested.push(id);
            }
        }

        // Validate the selection against the current player set first.
        let player_rows = sqlx::query(
            "SELECT id, first_name, last_name FROM players WHERE id = ANY($1)",
        )
        .bind(&requested)
        .fetch_all(self.pool.as_ref())
        .await?;
        if player_rows.len() != requested.len() {
            return Err(StoreError::PlayerNotFound);
        }

        let names: HashMap<PlayerId, String> = player_rows
            .iter()
            .map(|row| {
                let id: PlayerId = row.get("id");
                let first: String = row.get("first_name");
                let last: String = row.get("last_name");
                (id, format!("{first} {last}"))
            })
            .collect();

        // SUM tolerates duplicate rows but cannot double count while the
        // (player, tournament) pair stays unique.
        let score_rows = with_default_timeout(
            sqlx::query(
                "SELECT pt.player_id, t.held_on, SUM(pt.points) AS points
                 FROM points pt
                 JOIN tournaments t ON t.id = pt.tournament_id
                 WHERE pt.player_id = ANY($1)
                 GROUP BY pt.player_id, t.held_on
                 ORDER BY t.held_on ASC",
            )
            .bind(&requested)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        let mut entries: HashMap<PlayerId, Vec<ProgressionEntry>> = HashMap::new();
        for row in &score_rows {
            let player_id: PlayerId = row.get("player_id");
            entries.entry(player_id).or_default().push(ProgressionEntry {
                held_on: row.get("held_on"),
                points: row.get("points"),
            });
        }

        Ok(requested
            .into_iter()
            .map(|player_id| ProgressionSeries {
                player_id,
                display_name: names.get(&player_id).cloned().unwrap_or_default(),
                entries: entries.remove(&player_id).unwrap_or_default(),
            })
            .collect())
    }
}

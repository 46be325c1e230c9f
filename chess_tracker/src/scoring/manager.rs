//! Scoring manager implementation.

use super::models::{Category, Point, PointId, PointRow, validate_points};
use crate::db::errors::{StoreError, StoreResult, fk_violation, unique_violation};
use crate::roster::{PlayerId, TournamentId};
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::sync::Arc;

/// Manager for per-tournament point entries.
#[derive(Clone)]
pub struct ScoringManager {
    pool: Arc<PgPool>,
}

impl ScoringManager {
    /// Create a new scoring manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Record a player's score in a tournament.
    ///
    /// # Errors
    ///
    /// * [`StoreError::InvalidScore`] - Score negative or not a 0.5 multiple
    /// * [`StoreError::DuplicatePoint`] - The pair already has an entry
    /// * [`StoreError::PlayerNotFound`] / [`StoreError::TournamentNotFound`] -
    ///   Dangling reference
    pub async fn record_points(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
        points: f64,
        category: Category,
    ) -> StoreResult<Point> {
        let points = validate_points(points)?;

        let row = sqlx::query(
            "INSERT INTO points (tournament_id, player_id, points, category)
             VALUES ($1, $2, $3, $4)
             RETURNING id, tournament_id, player_id, points, category",
        )
        .bind(tournament_id)
        .bind(player_id)
        .bind(points)
        .bind(category.as_str())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_point_write_err)?;

        point_from_row(&row)
    }

    /// Change the score or category of an existing entry.
    pub async fn update_points(
        &self,
        point_id: PointId,
        points: f64,
        category: Category,
    ) -> StoreResult<Point> {
        let points = validate_points(points)?;

        let row = sqlx::query(
            "UPDATE points SET points = $2, category = $3 WHERE id = $1
             RETURNING id, tournament_id, player_id, points, category",
        )
        .bind(point_id)
        .bind(points)
        .bind(category.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(StoreError::PointNotFound)?;

        point_from_row(&row)
    }

    /// Remove a player's entry from a tournament's results.
    ///
    /// The player and the tournament themselves are untouched.
    pub async fn delete_points(&self, point_id: PointId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM points WHERE id = $1")
            .bind(point_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::PointNotFound);
        }
        Ok(())
    }

    /// Fetch a single entry by id.
    pub async fn get_points(&self, point_id: PointId) -> StoreResult<Point> {
        let row = sqlx::query(
            "SELECT id, tournament_id, player_id, points, category FROM points WHERE id = $1",
        )
        .bind(point_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(StoreError::PointNotFound)?;

        point_from_row(&row)
    }

    /// List a tournament's entries with player names, best score first.
    ///
    /// Fails with [`StoreError::TournamentNotFound`] for an unknown
    /// tournament id. Ties keep insertion order.
    pub async fn points_for_tournament(
        &self,
        tournament_id: TournamentId,
        category: Option<Category>,
    ) -> StoreResult<Vec<PointRow>> {
        let exists = sqlx::query("SELECT id FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if exists.is_none() {
            return Err(StoreError::TournamentNotFound);
        }

        let rows = sqlx::query(
            "SELECT pt.id, pt.player_id, pl.first_name, pl.last_name, pt.points, pt.category
             FROM points pt
             JOIN players pl ON pl.id = pt.player_id
             WHERE pt.tournament_id = $1
               AND ($2::TEXT IS NULL OR pt.category = $2)
             ORDER BY pt.points DESC, pt.id ASC",
        )
        .bind(tournament_id)
        .bind(category.map(|c| c.as_str()))
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            entries.push(PointRow {
                id: row.get("id"),
                player_id: row.get("player_id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                points: row.get("points"),
                category: Category::from_str(row.get("category"))?,
            });
        }
        Ok(entries)
    }
}

fn map_point_write_err(err: sqlx::Error) -> StoreError {
    if let Some(constraint) = unique_violation(&err) {
        return match constraint.as_str() {
            "uq_points_player_tournament" => StoreError::DuplicatePoint,
            _ => StoreError::Database(err),
        };
    }
    match fk_violation(&err).as_deref() {
        Some("fk_points_player") => StoreError::PlayerNotFound,
        Some("fk_points_tournament") => StoreError::TournamentNotFound,
        _ => StoreError::Database(err),
    }
}

fn point_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Point> {
    Ok(Point {
        id: row.get("id"),
        tournament_id: row.get("tournament_id"),
        player_id: row.get("player_id"),
        points: row.get("points"),
        category: Category::from_str(row.get("category"))?,
    })
}

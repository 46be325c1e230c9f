//! Export manager: fetches rows for the CSV formatter.

use super::{
    FULL_EXPORT_FILENAME, FullExportRow, TournamentExportRow, full_csv, tournament_csv,
    tournament_filename,
};
use crate::db::errors::{StoreError, StoreResult};
use crate::db::timeouts::{with_default_timeout, with_long_timeout};
use crate::roster::TournamentId;
use crate::scoring::Category;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::sync::Arc;

/// A CSV document ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub filename: String,
    pub content: String,
}

#[derive(Clone)]
pub struct ExportManager {
    pool: Arc<PgPool>,
}

impl ExportManager {
    /// Create a new export manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Export one tournament's results.
    ///
    /// The filename derives from the tournament date. Row order is the
    /// insertion order of the entries.
    ///
    /// # Errors
    ///
    /// * [`StoreError::TournamentNotFound`] - Unknown tournament id
    pub async fn export_tournament(&self, tournament_id: TournamentId) -> StoreResult<CsvDownload> {
        let tournament = sqlx::query("SELECT held_on FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::TournamentNotFound)?;
        let held_on: chrono::NaiveDate = tournament.get("held_on");

        let rows = with_default_timeout(
            sqlx::query(
                "SELECT pl.first_name, pl.last_name, pt.points, pt.category
                 FROM points pt
                 JOIN players pl ON pl.id = pt.player_id
                 WHERE pt.tournament_id = $1
                 ORDER BY pt.id ASC",
            )
            .bind(tournament_id)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        let mut export_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            export_rows.push(TournamentExportRow {
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                points: row.get("points"),
                category: Category::from_str(row.get("category"))?,
            });
        }

        Ok(CsvDownload {
            filename: tournament_filename(held_on),
            content: tournament_csv(&export_rows)?,
        })
    }

    /// Export every recorded point, ordered by tournament date ascending.
    pub async fn export_all(&self) -> StoreResult<CsvDownload> {
        let rows = with_long_timeout(
            sqlx::query(
                "SELECT pl.first_name, pl.last_name, t.held_on, pt.category, pt.points
                 FROM points pt
                 JOIN players pl ON pl.id = pt.player_id
                 JOIN tournaments t ON t.id = pt.tournament_id
                 ORDER BY t.held_on ASC, pt.id ASC",
            )
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        let mut export_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            export_rows.push(FullExportRow {
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                held_on: row.get("held_on"),
                category: Category::from_str(row.get("category"))?,
                points: row.get("points"),
            });
        }

        Ok(CsvDownload {
            filename: FULL_EXPORT_FILENAME.to_string(),
            content: full_csv(&export_rows)?,
        })
    }
}

//! Database module providing PostgreSQL connection pooling and schema setup.
//!
//! This module manages the database connection pool using sqlx and owns the
//! DDL for the tracker schema. The schema is applied idempotently at startup;
//! there is no separate migration tooling.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod errors;
pub mod timeouts;

pub use config::DatabaseConfig;
pub use errors::{StoreError, StoreResult};

/// Idempotent DDL applied at startup.
///
/// Uniqueness (player name pair, tournament date, one point entry per player
/// and tournament) and the deletion rules (tournament deletes cascade to
/// points, player deletes are blocked by them) are enforced here so that
/// concurrent conflicting writes resolve inside PostgreSQL.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS players (
        id BIGSERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        CONSTRAINT uq_players_name UNIQUE (first_name, last_name),
        CONSTRAINT ck_players_first_name CHECK (first_name <> ''),
        CONSTRAINT ck_players_last_name CHECK (last_name <> '')
    )",
    "CREATE TABLE IF NOT EXISTS tournaments (
        id BIGSERIAL PRIMARY KEY,
        held_on DATE NOT NULL,
        CONSTRAINT uq_tournaments_date UNIQUE (held_on)
    )",
    "CREATE TABLE IF NOT EXISTS points (
        id BIGSERIAL PRIMARY KEY,
        tournament_id BIGINT NOT NULL,
        player_id BIGINT NOT NULL,
        points DOUBLE PRECISION NOT NULL,
        category TEXT NOT NULL,
        CONSTRAINT fk_points_tournament FOREIGN KEY (tournament_id)
            REFERENCES tournaments (id) ON DELETE CASCADE,
        CONSTRAINT fk_points_player FOREIGN KEY (player_id)
            REFERENCES players (id),
        CONSTRAINT uq_points_player_tournament UNIQUE (player_id, tournament_id),
        CONSTRAINT ck_points_non_negative CHECK (points >= 0),
        CONSTRAINT ck_points_half_steps CHECK (points * 2 = floor(points * 2)),
        CONSTRAINT ck_points_category CHECK (category IN ('A', 'B'))
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        last_login TIMESTAMPTZ,
        CONSTRAINT uq_users_username UNIQUE (username)
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        expires_at TIMESTAMPTZ NOT NULL,
        CONSTRAINT fk_sessions_user FOREIGN KEY (user_id)
            REFERENCES users (id) ON DELETE CASCADE
    )",
];

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Arguments
    ///
    /// * `config` - Database configuration
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chess_tracker::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let config = DatabaseConfig::from_env();
    ///     let db = Database::new(&config).await?;
    ///     db.ensure_schema().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the tracker schema, creating any missing tables.
    ///
    /// Safe to run on every startup.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

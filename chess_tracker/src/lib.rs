//! # Chess Tracker
//!
//! A library for tracking chess tournament results: players, tournaments,
//! per-tournament category scores, aggregate rankings, progressions, and CSV
//! export, backed by PostgreSQL.
//!
//! ## Architecture
//!
//! Every operation is a stateless request against the shared store. Managers
//! are cheap, cloneable handles around an `Arc<PgPool>`; constraints that
//! must hold under concurrent writers (unique player name pair, unique
//! tournament date, one point entry per player and tournament) live in the
//! database schema, so racing inserts resolve to exactly one success.
//!
//! ## Core Modules
//!
//! - [`names`]: one-way normalization of user-entered player names
//! - [`roster`]: player and tournament records and their deletion rules
//! - [`scoring`]: per-tournament point entries with half-step score validation
//! - [`ranking`]: leaderboards, general classification, and progressions
//! - [`export`]: CSV serialization of tournament results
//! - [`auth`]: login, sessions, and startup account seeding
//! - [`db`]: connection pool, schema setup, and storage error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use chess_tracker::db::{Database, DatabaseConfig};
//! use chess_tracker::roster::RosterManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     db.ensure_schema().await?;
//!
//!     let roster = RosterManager::new(Arc::new(db.pool().clone()));
//!     let player = roster.add_player("jérôme", "o'neil").await?;
//!     assert_eq!(player.display_name(), "Jerome Oneil");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod db;
pub mod export;
pub mod names;
pub mod ranking;
pub mod roster;
pub mod scoring;

pub use auth::{AuthError, AuthManager};
pub use db::{Database, DatabaseConfig, StoreError, StoreResult};
pub use export::ExportManager;
pub use names::normalize_name;
pub use ranking::RankingManager;
pub use roster::{Player, PlayerId, RosterManager, Tournament, TournamentId};
pub use scoring::{Category, Point, PointId, ScoringManager};

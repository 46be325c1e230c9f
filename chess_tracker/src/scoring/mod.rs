//! Point entries: one recorded score per player per tournament.
//!
//! Scores are non-negative multiples of 0.5 in one of two categories. The
//! (player, tournament) pair is unique; concurrent duplicate inserts resolve
//! to one success inside the database.

pub mod manager;
pub mod models;

pub use manager::ScoringManager;
pub use models::{Category, Point, PointId, PointRow, validate_points};

//! Scoring data models.

use crate::db::errors::{StoreError, StoreResult};
use crate::roster::{PlayerId, TournamentId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Point entry ID type
pub type PointId = i64;

/// Competitive division a score belongs to within a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Category::A),
            "B" => Ok(Category::B),
            other => Err(StoreError::UnknownCategory(other.to_string())),
        }
    }
}

/// A single player's recorded score in one tournament.
///
/// At most one entry exists per (player, tournament) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub points: f64,
    pub category: Category,
}

/// A point entry joined with its player's name, as shown on results pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRow {
    pub id: PointId,
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub points: f64,
    pub category: Category,
}

/// Validate a points value: finite, non-negative, and a multiple of 0.5.
pub fn validate_points(points: f64) -> StoreResult<f64> {
    if !points.is_finite() || points < 0.0 {
        return Err(StoreError::InvalidScore(
            "points must be a non-negative number".to_string(),
        ));
    }
    if (points * 2.0).fract() != 0.0 {
        return Err(StoreError::InvalidScore(
            "points must be in 0.5 increments".to_string(),
        ));
    }
    Ok(points)
}

//! Ranking and progression result models.

use crate::roster::PlayerId;
use chrono::NaiveDate;
use serde::Serialize;

/// One leaderboard row for a single tournament and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub points: f64,
}

impl LeaderboardEntry {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One row of the cross-tournament general classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationEntry {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub total_points: f64,
}

impl ClassificationEntry {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single (tournament date, score) step in a player's progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionEntry {
    pub held_on: NaiveDate,
    pub points: f64,
}

/// A player's scores over time, ordered by ascending tournament date.
///
/// A player with no recorded points has an empty `entries` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionSeries {
    pub player_id: PlayerId,
    pub display_name: String,
    pub entries: Vec<ProgressionEntry>,
}

/// Parallel label/value arrays consumed by the external charting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    pub fn from_leaderboard(entries: &[LeaderboardEntry]) -> Self {
        Self {
            labels: entries.iter().map(LeaderboardEntry::display_name).collect(),
            data: entries.iter().map(|e| e.points).collect(),
        }
    }

    pub fn from_classification(entries: &[ClassificationEntry]) -> Self {
        Self {
            labels: entries.iter().map(ClassificationEntry::display_name).collect(),
            data: entries.iter().map(|e| e.total_points).collect(),
        }
    }
}

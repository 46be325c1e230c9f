//! Roster data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Player ID type
pub type PlayerId = i64;

/// Tournament ID type
pub type TournamentId = i64;

/// A registered player.
///
/// Both name fields hold normalized values (see [`crate::names`]); the pair
/// is unique across all players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
}

impl Player {
    /// Display name used in leaderboards and chart labels.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A tournament, identified by its unique calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub held_on: NaiveDate,
}

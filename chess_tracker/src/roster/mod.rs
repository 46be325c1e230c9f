//! Player and tournament roster.
//!
//! Players store normalized names with a unique (first, last) pair;
//! tournaments are unique per calendar date. Deleting a tournament removes
//! its point entries, while deleting a player is blocked until their entries
//! are removed.

pub mod manager;
pub mod models;

pub use manager::RosterManager;
pub use models::{Player, PlayerId, Tournament, TournamentId};

//! Leaderboards, general classification, and player progressions.
//!
//! All operations here are pure reads; grouping, ordering, and truncation
//! are pushed into SQL so results stay consistent under concurrent writes.

pub mod manager;
pub mod models;

pub use manager::RankingManager;
pub use models::{
    ChartSeries, ClassificationEntry, LeaderboardEntry, ProgressionEntry, ProgressionSeries,
};

//! Integration tests for the ranking, progression, and export engines.

use chess_tracker::db::{Database, DatabaseConfig, StoreError};
use chess_tracker::export::ExportManager;
use chess_tracker::ranking::{ChartSeries, RankingManager};
use chess_tracker::roster::{Player, RosterManager, Tournament};
use chess_tracker::scoring::{Category, ScoringManager};
use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use std::sync::Arc;

async fn setup_test_db() -> Arc<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/chess_tracker_test".to_string());

    let config = DatabaseConfig {
        database_url,
        max_connections: 5,
        min_connections: 1,
        connection_timeout_secs: 5,
        idle_timeout_secs: 300,
        max_lifetime_secs: 1800,
    };

    let db = Database::new(&config)
        .await
        .expect("Failed to create test database");
    db.ensure_schema().await.expect("Failed to apply schema");

    Arc::new(db.pool().clone())
}

fn unique_name(prefix: &str) -> String {
    let mut name = prefix.to_string();
    for _ in 0..10 {
        let offset: u8 = rand::random::<u8>() % 26;
        name.push((b'a' + offset) as char);
    }
    name
}

/// A random far-future year unlikely to be shared with other test runs.
fn unique_year() -> i32 {
    3000 + (rand::random::<u16>() % 4000) as i32
}

struct Fixture {
    roster: RosterManager,
    scoring: ScoringManager,
    ranking: RankingManager,
    export: ExportManager,
    players: Vec<Player>,
    tournaments: Vec<Tournament>,
}

impl Fixture {
    async fn new(player_count: usize, dates: &[NaiveDate]) -> Self {
        let pool = setup_test_db().await;
        let roster = RosterManager::new(pool.clone());
        let scoring = ScoringManager::new(pool.clone());
        let ranking = RankingManager::new(pool.clone());
        let export = ExportManager::new(pool);

        let mut players = Vec::new();
        for _ in 0..player_count {
            players.push(
                roster
                    .add_player(&unique_name("rank"), &unique_name("test"))
                    .await
                    .expect("player"),
            );
        }

        let mut tournaments = Vec::new();
        for &date in dates {
            tournaments.push(roster.add_tournament(date).await.expect("tournament"));
        }

        Self {
            roster,
            scoring,
            ranking,
            export,
            players,
            tournaments,
        }
    }

    async fn teardown(self) {
        for tournament in &self.tournaments {
            let _ = self.roster.delete_tournament(tournament.id).await;
        }
        for player in &self.players {
            let _ = self.roster.delete_player(player.id).await;
        }
    }
}

#[tokio::test]
async fn leaderboard_filters_by_category_and_truncates() {
    let year = unique_year();
    let date = NaiveDate::from_ymd_opt(year, 5, 4).expect("date");
    let fx = Fixture::new(3, &[date]).await;
    let t = fx.tournaments[0].id;

    fx.scoring
        .record_points(t, fx.players[0].id, 10.0, Category::A)
        .await
        .expect("p1");
    fx.scoring
        .record_points(t, fx.players[1].id, 8.0, Category::A)
        .await
        .expect("p2");
    fx.scoring
        .record_points(t, fx.players[2].id, 9.0, Category::B)
        .await
        .expect("p3");

    let top_a = fx
        .ranking
        .tournament_leaderboard(t, Category::A, Some(1))
        .await
        .expect("category A board");
    assert_eq!(top_a.len(), 1);
    assert_eq!(top_a[0].player_id, fx.players[0].id);
    assert_eq!(top_a[0].points, 10.0);

    let board_b = fx
        .ranking
        .tournament_leaderboard(t, Category::B, None)
        .await
        .expect("category B board");
    assert_eq!(board_b.len(), 1);
    assert_eq!(board_b[0].player_id, fx.players[2].id);

    // Chart arrays stay parallel to the board ordering.
    let chart = ChartSeries::from_leaderboard(&top_a);
    assert_eq!(chart.labels.len(), chart.data.len());
    assert_eq!(chart.data, vec![10.0]);

    fx.teardown().await;
}

#[tokio::test]
async fn leaderboard_for_unknown_tournament_is_not_found() {
    let pool = setup_test_db().await;
    let ranking = RankingManager::new(pool);

    let result = ranking
        .tournament_leaderboard(i64::MAX, Category::A, Some(5))
        .await;
    assert!(matches!(result, Err(StoreError::TournamentNotFound)));
}

#[tokio::test]
async fn classification_sums_and_filters_by_year() {
    let year = unique_year();
    let dates = [
        NaiveDate::from_ymd_opt(year, 1, 1).expect("date"),
        NaiveDate::from_ymd_opt(year + 1, 1, 1).expect("date"),
    ];
    let fx = Fixture::new(1, &dates).await;
    let player = &fx.players[0];

    fx.scoring
        .record_points(fx.tournaments[0].id, player.id, 3.0, Category::A)
        .await
        .expect("first year");
    fx.scoring
        .record_points(fx.tournaments[1].id, player.id, 5.0, Category::A)
        .await
        .expect("second year");

    let first_year = fx
        .ranking
        .general_classification(Some(year), None)
        .await
        .expect("filtered classification");
    let entry = first_year
        .iter()
        .find(|e| e.player_id == player.id)
        .expect("player present in their own year");
    assert_eq!(entry.total_points, 3.0);

    let unfiltered = fx
        .ranking
        .general_classification(None, None)
        .await
        .expect("full classification");
    let entry = unfiltered
        .iter()
        .find(|e| e.player_id == player.id)
        .expect("player present unfiltered");
    assert_eq!(entry.total_points, 8.0);

    // A year with no scored tournaments excludes the player entirely.
    let empty_year = fx
        .ranking
        .general_classification(Some(year + 2), None)
        .await
        .expect("empty year is not an error");
    assert!(empty_year.iter().all(|e| e.player_id != player.id));

    fx.teardown().await;
}

#[tokio::test]
async fn classification_orders_by_total_descending() {
    let year = unique_year();
    let dates = [
        NaiveDate::from_ymd_opt(year, 2, 1).expect("date"),
        NaiveDate::from_ymd_opt(year, 9, 1).expect("date"),
    ];
    let fx = Fixture::new(2, &dates).await;

    // players[0]: 2 + 2 = 4, players[1]: 7.5 in one tournament.
    fx.scoring
        .record_points(fx.tournaments[0].id, fx.players[0].id, 2.0, Category::A)
        .await
        .expect("entry");
    fx.scoring
        .record_points(fx.tournaments[1].id, fx.players[0].id, 2.0, Category::A)
        .await
        .expect("entry");
    fx.scoring
        .record_points(fx.tournaments[0].id, fx.players[1].id, 7.5, Category::B)
        .await
        .expect("entry");

    let board = fx
        .ranking
        .general_classification(Some(year), None)
        .await
        .expect("classification");
    let ours: Vec<_> = board
        .iter()
        .filter(|e| fx.players.iter().any(|p| p.id == e.player_id))
        .collect();

    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].player_id, fx.players[1].id);
    assert_eq!(ours[0].total_points, 7.5);
    assert_eq!(ours[1].total_points, 4.0);

    fx.teardown().await;
}

#[tokio::test]
async fn progression_orders_by_date_regardless_of_insertion() {
    let year = unique_year();
    let early = NaiveDate::from_ymd_opt(year, 1, 10).expect("date");
    let late = NaiveDate::from_ymd_opt(year, 11, 10).expect("date");
    let fx = Fixture::new(2, &[late, early]).await;
    let player = &fx.players[0];

    // Late tournament scored first; progression must still come back
    // ordered by ascending date.
    fx.scoring
        .record_points(fx.tournaments[0].id, player.id, 9.0, Category::A)
        .await
        .expect("late entry");
    fx.scoring
        .record_points(fx.tournaments[1].id, player.id, 4.0, Category::A)
        .await
        .expect("early entry");

    let series = fx
        .ranking
        .progression(&[player.id, fx.players[1].id])
        .await
        .expect("progression");

    assert_eq!(series.len(), 2);
    let ours = &series[0];
    assert_eq!(ours.player_id, player.id);
    assert_eq!(ours.entries.len(), 2);
    assert_eq!(ours.entries[0].held_on, early);
    assert_eq!(ours.entries[0].points, 4.0);
    assert_eq!(ours.entries[1].held_on, late);
    assert!(ours.entries[0].held_on.year() == year);

    // Second player has no entries: empty series, not an error.
    assert_eq!(series[1].player_id, fx.players[1].id);
    assert!(series[1].entries.is_empty());

    fx.teardown().await;
}

#[tokio::test]
async fn progression_validates_selection() {
    let pool = setup_test_db().await;
    let ranking = RankingManager::new(pool);

    let result = ranking.progression(&[]).await;
    assert!(matches!(result, Err(StoreError::EmptySelection)));

    let result = ranking.progression(&[i64::MAX]).await;
    assert!(matches!(result, Err(StoreError::PlayerNotFound)));
}

#[tokio::test]
async fn tournament_export_contains_recorded_rows() {
    let year = unique_year();
    let date = NaiveDate::from_ymd_opt(year, 6, 15).expect("date");
    let fx = Fixture::new(1, &[date]).await;
    let player = &fx.players[0];

    fx.scoring
        .record_points(fx.tournaments[0].id, player.id, 10.0, Category::A)
        .await
        .expect("entry");

    let download = fx
        .export
        .export_tournament(fx.tournaments[0].id)
        .await
        .expect("export");

    assert_eq!(download.filename, format!("tournament_{date}.csv"));
    let mut lines = download.content.lines();
    assert_eq!(lines.next(), Some("First Name,Last Name,Points,Category"));
    let row = lines.next().expect("one data row");
    assert_eq!(
        row,
        format!("{},{},10,A", player.first_name, player.last_name)
    );

    fx.teardown().await;
}

#[tokio::test]
async fn export_for_unknown_tournament_is_not_found() {
    let pool = setup_test_db().await;
    let export = ExportManager::new(pool);

    let result = export.export_tournament(i64::MAX).await;
    assert!(matches!(result, Err(StoreError::TournamentNotFound)));
}

#[tokio::test]
async fn full_export_orders_by_tournament_date() {
    let year = unique_year();
    let early = NaiveDate::from_ymd_opt(year, 3, 1).expect("date");
    let late = NaiveDate::from_ymd_opt(year, 10, 1).expect("date");
    let fx = Fixture::new(1, &[late, early]).await;
    let player = &fx.players[0];

    fx.scoring
        .record_points(fx.tournaments[0].id, player.id, 6.0, Category::B)
        .await
        .expect("late entry");
    fx.scoring
        .record_points(fx.tournaments[1].id, player.id, 3.5, Category::A)
        .await
        .expect("early entry");

    let download = fx.export.export_all().await.expect("full export");
    assert_eq!(download.filename, "all_results.csv");

    let our_rows: Vec<&str> = download
        .content
        .lines()
        .filter(|line| line.contains(&player.last_name))
        .collect();
    assert_eq!(our_rows.len(), 2);
    assert!(our_rows[0].contains(&early.to_string()));
    assert!(our_rows[1].contains(&late.to_string()));

    fx.teardown().await;
}

//! Integration tests for the roster and scoring managers.
//!
//! Tests uniqueness constraints, normalization on the write path, and the
//! asymmetric deletion rules (tournament deletes cascade, player deletes are
//! blocked by recorded points).

use chess_tracker::db::{Database, DatabaseConfig, StoreError};
use chess_tracker::roster::RosterManager;
use chess_tracker::scoring::{Category, ScoringManager};
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

/// Helper to create a test database pool
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

/// Random all-letter name so normalization keeps tests unique.
fn unique_name(prefix: &str) -> String {
    let mut name = prefix.to_string();
    for _ in 0..10 {
        let offset: u8 = rand::random::<u8>() % 26;
        name.push((b'a' + offset) as char);
    }
    name
}

/// Random date far in the future to dodge other tests' tournaments.
fn unique_date() -> NaiveDate {
    let year = 3000 + (rand::random::<u16>() % 4000) as i32;
    let day = 1 + (rand::random::<u16>() % 28) as u32;
    let month = 1 + (rand::random::<u16>() % 12) as u32;
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[tokio::test]
async fn add_player_normalizes_names() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool);

    let suffix = unique_name("");
    let player = roster
        .add_player(&format!("jérôme{suffix}"), &format!("o'neil{suffix}"))
        .await
        .expect("add should succeed");

    assert!(player.first_name.starts_with("Jerome"));
    assert!(player.last_name.starts_with("Oneil"));
    assert!(!player.first_name.contains('\''));

    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn duplicate_player_name_pair_is_rejected() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool);

    let first = unique_name("dup");
    let last = unique_name("pair");
    let player = roster.add_player(&first, &last).await.expect("first insert");

    // Different raw spelling, same normalized pair.
    let result = roster.add_player(&first.to_uppercase(), &last.to_uppercase()).await;
    assert!(matches!(result, Err(StoreError::PlayerNameTaken)));

    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn empty_normalized_name_is_rejected() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool);

    let result = roster.add_player("1234", &unique_name("smith")).await;
    assert!(matches!(result, Err(StoreError::MissingField("first_name"))));
}

#[tokio::test]
async fn rename_renormalizes_both_fields() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool);

    let player = roster
        .add_player(&unique_name("old"), &unique_name("name"))
        .await
        .expect("insert");

    let suffix = unique_name("");
    let renamed = roster
        .rename_player(player.id, &format!("ÅSA{suffix}"), &format!("lindgren-{suffix}"))
        .await
        .expect("rename should succeed");

    assert!(renamed.first_name.starts_with("Asa"));
    assert_eq!(renamed.id, player.id);

    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn duplicate_tournament_date_is_rejected() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool);

    let date = unique_date();
    let tournament = roster.add_tournament(date).await.expect("first insert");

    let result = roster.add_tournament(date).await;
    assert!(matches!(result, Err(StoreError::TournamentDateTaken)));

    roster.delete_tournament(tournament.id).await.expect("cleanup");
}

#[tokio::test]
async fn tournament_date_edit_preserves_uniqueness() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool);

    let first = roster.add_tournament(unique_date()).await.expect("insert");
    let second = roster.add_tournament(unique_date()).await.expect("insert");

    let result = roster.set_tournament_date(second.id, first.held_on).await;
    assert!(matches!(result, Err(StoreError::TournamentDateTaken)));

    let moved_to = unique_date();
    let moved = roster
        .set_tournament_date(second.id, moved_to)
        .await
        .expect("moving to a free date should succeed");
    assert_eq!(moved.held_on, moved_to);

    roster.delete_tournament(first.id).await.expect("cleanup");
    roster.delete_tournament(second.id).await.expect("cleanup");
}

#[tokio::test]
async fn duplicate_point_entry_is_rejected() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    let player = roster
        .add_player(&unique_name("pt"), &unique_name("dup"))
        .await
        .expect("player");
    let tournament = roster.add_tournament(unique_date()).await.expect("tournament");

    scoring
        .record_points(tournament.id, player.id, 5.0, Category::A)
        .await
        .expect("first entry");

    let result = scoring
        .record_points(tournament.id, player.id, 3.0, Category::B)
        .await;
    assert!(matches!(result, Err(StoreError::DuplicatePoint)));

    roster.delete_tournament(tournament.id).await.expect("cleanup");
    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn off_step_scores_are_rejected_before_storage() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    let player = roster
        .add_player(&unique_name("bad"), &unique_name("score"))
        .await
        .expect("player");
    let tournament = roster.add_tournament(unique_date()).await.expect("tournament");

    for points in [0.3, -1.0] {
        let result = scoring
            .record_points(tournament.id, player.id, points, Category::A)
            .await;
        assert!(
            matches!(result, Err(StoreError::InvalidScore(_))),
            "{points} should be rejected"
        );
    }

    // Half steps are fine, including zero.
    scoring
        .record_points(tournament.id, player.id, 13.5, Category::A)
        .await
        .expect("13.5 is a valid score");

    roster.delete_tournament(tournament.id).await.expect("cleanup");
    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn deleting_tournament_cascades_to_points() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    let player = roster
        .add_player(&unique_name("casc"), &unique_name("ade"))
        .await
        .expect("player");
    let tournament = roster.add_tournament(unique_date()).await.expect("tournament");
    let point = scoring
        .record_points(tournament.id, player.id, 4.5, Category::B)
        .await
        .expect("entry");

    roster
        .delete_tournament(tournament.id)
        .await
        .expect("delete with points should cascade");

    let result = scoring.get_points(point.id).await;
    assert!(matches!(result, Err(StoreError::PointNotFound)));

    // The player itself survives the cascade.
    roster.delete_player(player.id).await.expect("player should now delete");
}

#[tokio::test]
async fn deleting_player_with_points_is_blocked() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    let player = roster
        .add_player(&unique_name("blo"), &unique_name("cked"))
        .await
        .expect("player");
    let tournament = roster.add_tournament(unique_date()).await.expect("tournament");
    let point = scoring
        .record_points(tournament.id, player.id, 2.0, Category::A)
        .await
        .expect("entry");

    let result = roster.delete_player(player.id).await;
    assert!(matches!(result, Err(StoreError::PlayerHasPoints)));

    // Both the player and the entry are intact afterwards.
    let fetched = scoring.get_points(point.id).await.expect("entry intact");
    assert_eq!(fetched.points, 2.0);
    roster.get_player(player.id).await.expect("player intact");

    roster.delete_tournament(tournament.id).await.expect("cleanup");
    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn deleting_point_keeps_player_and_tournament() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    let player = roster
        .add_player(&unique_name("keep"), &unique_name("both"))
        .await
        .expect("player");
    let tournament = roster.add_tournament(unique_date()).await.expect("tournament");
    let point = scoring
        .record_points(tournament.id, player.id, 1.0, Category::A)
        .await
        .expect("entry");

    scoring.delete_points(point.id).await.expect("delete entry");

    roster.get_player(player.id).await.expect("player intact");
    roster.get_tournament(tournament.id).await.expect("tournament intact");

    roster.delete_tournament(tournament.id).await.expect("cleanup");
    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn update_points_changes_score_and_category() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    let player = roster
        .add_player(&unique_name("upd"), &unique_name("ate"))
        .await
        .expect("player");
    let tournament = roster.add_tournament(unique_date()).await.expect("tournament");
    let point = scoring
        .record_points(tournament.id, player.id, 1.0, Category::A)
        .await
        .expect("entry");

    let updated = scoring
        .update_points(point.id, 6.5, Category::B)
        .await
        .expect("update");
    assert_eq!(updated.points, 6.5);
    assert_eq!(updated.category, Category::B);

    roster.delete_tournament(tournament.id).await.expect("cleanup");
    roster.delete_player(player.id).await.expect("cleanup");
}

#[tokio::test]
async fn unknown_ids_surface_not_found() {
    let pool = setup_test_db().await;
    let roster = RosterManager::new(pool.clone());
    let scoring = ScoringManager::new(pool);

    assert!(matches!(
        roster.get_player(i64::MAX).await,
        Err(StoreError::PlayerNotFound)
    ));
    assert!(matches!(
        roster.delete_tournament(i64::MAX).await,
        Err(StoreError::TournamentNotFound)
    ));
    assert!(matches!(
        scoring.update_points(i64::MAX, 1.0, Category::A).await,
        Err(StoreError::PointNotFound)
    ));
    assert!(matches!(
        scoring.points_for_tournament(i64::MAX, None).await,
        Err(StoreError::TournamentNotFound)
    ));
}

//! HTTP API for the tournament tracker.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower-http**: CORS middleware
//! - **JWT**: Token-based authentication with access/refresh tokens
//!
//! # Modules
//!
//! - [`auth`]: Login, logout, and token refresh for seeded accounts
//! - [`players`]: Player roster CRUD
//! - [`tournaments`]: Tournament CRUD
//! - [`results`]: Per-tournament point entries
//! - [`rankings`]: Leaderboards, general classification, and progressions
//! - [`export`]: CSV downloads
//! - [`middleware`]: Bearer-token authentication for protected endpoints
//! - [`request_id`]: Request correlation ids for log tracing
//!
//! # Endpoint Summary
//!
//! ```text
//! GET    /health                                  - Health check (public)
//! POST   /api/v1/auth/login                       - Login (public)
//! POST   /api/v1/auth/logout                      - Logout
//! POST   /api/v1/auth/refresh                     - Rotate tokens
//! GET    /api/v1/players                          - List players
//! POST   /api/v1/players                          - Add player
//! PUT    /api/v1/players/{id}                     - Rename player
//! DELETE /api/v1/players/{id}                     - Delete player
//! GET    /api/v1/tournaments                      - List tournaments
//! POST   /api/v1/tournaments                      - Add tournament
//! PUT    /api/v1/tournaments/{id}                 - Change date
//! DELETE /api/v1/tournaments/{id}                 - Delete (cascades points)
//! GET    /api/v1/results?tournament_id=&category= - Tournament results
//! POST   /api/v1/results                          - Record points
//! PUT    /api/v1/results/{id}                     - Update points/category
//! DELETE /api/v1/results/{id}                     - Remove entry
//! GET    /api/v1/tournaments/{id}/leaderboard     - Category leaderboard
//! GET    /api/v1/classification?year=&top=        - General classification
//! POST   /api/v1/progression                      - Per-player time series
//! GET    /api/v1/tournaments/{id}/export.csv      - Tournament CSV
//! GET    /api/v1/export.csv                       - Full-database CSV
//! ```
//!
//! Every route below `/api/v1` except login requires a
//! `Authorization: Bearer <token>` header.

pub mod auth;
pub mod export;
pub mod middleware;
pub mod players;
pub mod rankings;
pub mod request_id;
pub mod results;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
};
use chess_tracker::{
    AuthManager, ExportManager, RankingManager, RosterManager, ScoringManager, StoreError,
};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to Arc wrappers).
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub roster_manager: Arc<RosterManager>,
    pub scoring_manager: Arc<ScoringManager>,
    pub ranking_manager: Arc<RankingManager>,
    pub export_manager: Arc<ExportManager>,
    pub pool: Arc<PgPool>,
}

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a storage error to a status code and sanitized JSON body.
pub(crate) fn store_error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        StoreError::InvalidScore(_)
        | StoreError::MissingField(_)
        | StoreError::EmptySelection
        | StoreError::UnknownCategory(_) => StatusCode::BAD_REQUEST,
        StoreError::PlayerNotFound
        | StoreError::TournamentNotFound
        | StoreError::PointNotFound => StatusCode::NOT_FOUND,
        StoreError::PlayerNameTaken
        | StoreError::TournamentDateTaken
        | StoreError::DuplicatePoint
        | StoreError::PlayerHasPoints => StatusCode::CONFLICT,
        StoreError::Database(_) | StoreError::Csv(_) | StoreError::Timeout => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Storage error: {err}");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Arguments
///
/// - `state`: Application state with managers
pub fn create_router(state: AppState) -> Router {
    let v1_routes = create_v1_router(state.clone());

    let root_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(root_routes)
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create API v1 router with all versioned endpoints.
fn create_v1_router(state: AppState) -> Router<AppState> {
    // Login is the only public API route; everything else sits behind the
    // bearer-token middleware.
    let public_routes = Router::new().route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/players", get(players::list_players).post(players::create_player))
        .route(
            "/players/{player_id}",
            put(players::rename_player).delete(players::delete_player),
        )
        .route(
            "/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route(
            "/tournaments/{tournament_id}",
            put(tournaments::update_tournament).delete(tournaments::delete_tournament),
        )
        .route("/results", get(results::list_results).post(results::record_results))
        .route(
            "/results/{point_id}",
            put(results::update_results).delete(results::delete_results),
        )
        .route(
            "/tournaments/{tournament_id}/leaderboard",
            get(rankings::tournament_leaderboard),
        )
        .route("/classification", get(rankings::general_classification))
        .route("/progression", post(rankings::progression))
        .route(
            "/tournaments/{tournament_id}/export.csv",
            get(export::export_tournament),
        )
        .route("/export.csv", get(export::export_all))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new().merge(public_routes).merge(protected_routes)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers, `503` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(&*state.pool)
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}

//! Chess tournament results tracking server.
//!
//! Wires the database pool, the domain managers, and the startup user
//! seeding pass into an axum HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use chess_tracker::{
    AuthManager, ExportManager, RankingManager, RosterManager, ScoringManager, db::Database,
};
use ct_server::{api, config::ServerConfig, logging};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a chess tournament results tracking server

USAGE:
  ct_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/chess_tracker]
  --seed-file  PATH        JSON file of seed accounts  [default: env SEED_USERS_FILE]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  JWT_SECRET               JWT signing secret (required)
  PASSWORD_PEPPER          Password hashing pepper (required)
  SEED_USERS_FILE          JSON file of {username, password} accounts
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let seed_file_override: Option<PathBuf> = pargs.opt_value_from_str("--seed-file")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override, seed_file_override)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    info!("Starting tournament tracking server at {}", config.bind);
    info!("Connecting to database: {}", config.database.database_url);

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    db.ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to apply schema: {}", e))?;

    info!("Database connected and schema applied");

    let pool = Arc::new(db.pool().clone());
    let auth_manager = Arc::new(AuthManager::new(
        pool.clone(),
        config.security.password_pepper.clone(),
        config.security.jwt_secret.clone(),
    ));

    // Reconcile seeded accounts before accepting traffic.
    if let Some(seed_file) = &config.seed_file {
        let summary = auth_manager
            .seed_users_from_file(seed_file)
            .await
            .map_err(|e| anyhow::anyhow!("User seeding failed for {:?}: {}", seed_file, e))?;
        info!(
            "Seeded users from {:?}: {} created, {} existing, {} malformed",
            seed_file, summary.created, summary.skipped, summary.malformed
        );
    } else {
        info!("No seed file configured, skipping user seeding");
    }

    let api_state = api::AppState {
        auth_manager,
        roster_manager: Arc::new(RosterManager::new(pool.clone())),
        scoring_manager: Arc::new(ScoringManager::new(pool.clone())),
        ranking_manager: Arc::new(RankingManager::new(pool.clone())),
        export_manager: Arc::new(ExportManager::new(pool.clone())),
        pool,
    };

    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}

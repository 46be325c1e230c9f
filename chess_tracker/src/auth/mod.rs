//! Authentication module providing login, session management, and seeding.
//!
//! This module implements authentication with:
//! - Argon2id password hashing with server-side pepper
//! - JWT access tokens (15-minute expiry)
//! - Rotating refresh tokens (7-day expiry)
//! - Idempotent account seeding from a JSON file at startup
//!
//! Accounts are provisioned exclusively by the seeding pass; there is no
//! self-service registration endpoint.
//!
//! ## Example
//!
//! ```no_run
//! use chess_tracker::auth::{AuthManager, LoginRequest};
//! use chess_tracker::db::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let auth = AuthManager::new(
//!         Arc::new(db.pool().clone()),
//!         "secret_pepper".to_string(),
//!         "jwt_secret".to_string(),
//!     );
//!
//!     let (user, tokens) = auth
//!         .login(LoginRequest {
//!             username: "arbiter".to_string(),
//!             password: "s3cret".to_string(),
//!         })
//!         .await?;
//!     println!("Logged in {} with token {}", user.username, tokens.access_token);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod seed;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{AccessTokenClaims, LoginRequest, SessionTokens, User, UserId};
pub use seed::{SeedRecord, SeedSummary};

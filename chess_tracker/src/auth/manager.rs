//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{AccessTokenClaims, LoginRequest, SessionTokens, User, UserId},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

/// Authentication manager
///
/// Verifies seeded accounts, issues JWT access tokens, and keeps rotating
/// refresh tokens in the `sessions` table. There is no self-service
/// registration; accounts come from the startup seeding pass (see
/// [`crate::auth::seed`]).
#[derive(Clone)]
pub struct AuthManager {
    pool: Arc<PgPool>,
    pepper: String,
    jwt_secret: String,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `pepper` - Server-side pepper for password hashing
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(pool: Arc<PgPool>, pepper: String, jwt_secret: String) -> Self {
        Self {
            pool,
            pepper,
            jwt_secret,
            access_token_duration: Duration::minutes(15),
            refresh_token_duration: Duration::days(7),
        }
    }

    /// Login a user
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - Username doesn't exist
    /// * `AuthError::InvalidPassword` - Incorrect password
    pub async fn login(&self, request: LoginRequest) -> AuthResult<(User, SessionTokens)> {
        let user_row = sqlx::query(
            "SELECT id, username, password_hash, created_at, last_login
             FROM users WHERE username = $1",
        )
        .bind(&request.username)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AuthError::UserNotFound)?;

        let password_hash: String = user_row.get("password_hash");
        self.verify_password(&request.password, &password_hash)?;

        let user = User {
            id: user_row.get("id"),
            username: user_row.get("username"),
            created_at: user_row.get::<DateTime<Utc>, _>("created_at"),
            last_login: user_row.get::<Option<DateTime<Utc>>, _>("last_login"),
        };

        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(self.pool.as_ref())
            .await?;

        let tokens = self.create_session(user.id, &user.username).await?;
        Ok((user, tokens))
    }

    /// Create a new session with access and refresh tokens
    async fn create_session(&self, user_id: UserId, username: &str) -> AuthResult<SessionTokens> {
        let access_token = self.generate_access_token(user_id, username)?;
        let refresh_token = Uuid::new_v4().to_string();

        let expires_at = Utc::now() + self.refresh_token_duration;
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&refresh_token)
            .bind(user_id)
            .bind(expires_at)
            .execute(self.pool.as_ref())
            .await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }

    /// Refresh access token using refresh token
    ///
    /// The old refresh token is rotated out on success.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - Refresh token not found
    /// * `AuthError::SessionExpired` - Refresh token expired
    pub async fn refresh_token(&self, refresh_token: String) -> AuthResult<SessionTokens> {
        let session_row = sqlx::query(
            "SELECT token, user_id, expires_at FROM sessions WHERE token = $1",
        )
        .bind(&refresh_token)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AuthError::InvalidRefreshToken)?;

        let expires_at: DateTime<Utc> = session_row.get("expires_at");
        if expires_at < Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = $1")
                .bind(&refresh_token)
                .execute(self.pool.as_ref())
                .await?;
            return Err(AuthError::SessionExpired);
        }

        let user_id: UserId = session_row.get("user_id");
        let user_row = sqlx::query("SELECT username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let username: String = user_row.get("username");

        // Rotate: the old token is single-use.
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(&refresh_token)
            .execute(self.pool.as_ref())
            .await?;

        self.create_session(user_id, &username).await
    }

    /// Logout user by invalidating refresh token
    pub async fn logout(&self, refresh_token: String) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(&refresh_token)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    /// Verify an access token and return its claims.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let token_data = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub(crate) fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    /// Hash password with Argon2id + pepper
    pub(crate) fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidPassword)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidPassword)
    }

    /// Generate JWT access token
    fn generate_access_token(&self, user_id: UserId, username: &str) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user_id,
            username: username.to_string(),
            exp: (now + self.access_token_duration).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }
}

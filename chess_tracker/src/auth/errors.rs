//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Password verification failed
    #[error("Invalid password")]
    InvalidPassword,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// JWT token error
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    /// Session expired
    #[error("Session expired")]
    SessionExpired,

    /// Invalid refresh token
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Seed file could not be read
    #[error("Seed file error: {0}")]
    SeedFile(#[from] std::io::Error),

    /// Seed file is not a JSON array of account records
    #[error("Seed file format error: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information.
    ///
    /// Database, JWT, and seed-file errors are sanitized to prevent
    /// information disclosure about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::SeedFile(_) | AuthError::SeedFormat(_) => {
                "Internal server error".to_string()
            }
            AuthError::JwtError(_) => "Authentication failed".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

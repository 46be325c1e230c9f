//! Authentication API handlers.
//!
//! Endpoints for logging in with a seeded account, logging out, and rotating
//! tokens. There is no registration endpoint; accounts are reconciled from
//! the seed file at startup.
//!
//! # Examples
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/auth/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"username": "arbiter", "password": "s3cret"}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use chess_tracker::auth::LoginRequest;
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse};

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub username: String,
}

/// Authenticate a user and generate session tokens.
///
/// Validates credentials against the seeded accounts and returns a JWT access
/// token (15-minute expiry) plus a rotating refresh token.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = LoginRequest {
        username: payload.username,
        password: payload.password,
    };

    match state.auth_manager.login(request).await {
        Ok((user, tokens)) => Ok(Json(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user_id: user.id,
            username: user.username,
        })),
        Err(e) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: e.client_message(),
            }),
        )),
    }
}

/// Logout and invalidate the given refresh token.
///
/// The access token keeps working until it expires naturally.
///
/// # Errors
///
/// - `400 Bad Request`: Storage failure while deleting the session
pub async fn logout(
    State(state): State<AppState>,
    Json(refresh_token): Json<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.logout(refresh_token).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.client_message(),
            }),
        )),
    }
}

/// Exchange a valid refresh token for a new token pair.
///
/// The old refresh token is invalidated (rotation).
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid, expired, or already-rotated refresh token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(old_refresh_token): Json<String>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.refresh_token(old_refresh_token).await {
        Ok(tokens) => match state.auth_manager.verify_access_token(&tokens.access_token) {
            Ok(claims) => Ok(Json(AuthResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                user_id: claims.sub,
                username: claims.username,
            })),
            Err(e) => Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.client_message(),
                }),
            )),
        },
        Err(e) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: e.client_message(),
            }),
        )),
    }
}

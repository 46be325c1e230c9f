//! Authentication middleware for protected endpoints.
//!
//! Extracts and validates the JWT access token from the Authorization header,
//! then injects the authenticated user id into request extensions for
//! downstream handlers:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//!
//! async fn protected_handler(Extension(user_id): Extension<i64>) -> String {
//!     format!("Authenticated as user {user_id}")
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::AppState;

/// Validate the `Authorization: Bearer <token>` header and inject the user id.
///
/// Missing header, malformed value, or an invalid/expired token all return
/// `401 Unauthorized`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match auth_header {
        Some(t) => t,
        None => return Err(StatusCode::UNAUTHORIZED),
    };

    match state.auth_manager.verify_access_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims.sub);
            Ok(next.run(request).await)
        }
        Err(_) => Err(StatusCode::UNAUTHORIZED),
    }
}

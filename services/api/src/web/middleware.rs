//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use persona_cart_core::ports::PortError;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::web::state::{AppState, CurrentUser};

pub const SESSION_COOKIE: &str = "session";

/// Finds the session token in the `session` cookie or, failing that, in an
/// `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|token| !token.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

/// Middleware that validates the session token and extracts the account.
///
/// If valid, inserts a `CurrentUser` into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract the token
    let token = session_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?
        .to_string();

    // 2. Validate it, get the account id
    let user_id = state
        .db
        .validate_auth_session(&token)
        .await
        .map_err(|e| match e {
            PortError::Unauthorized | PortError::NotFound(_) => {
                debug!("Rejected unknown or expired session");
                ApiError::Unauthorized("Invalid token".to_string())
            }
            other => {
                error!("Failed to validate auth session: {:?}", other);
                ApiError::Port(other)
            }
        })?;

    // 3. Insert the account into request extensions and continue
    req.extensions_mut().insert(CurrentUser { user_id });
    Ok(next.run(req).await)
}

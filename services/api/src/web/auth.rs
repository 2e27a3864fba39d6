//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for account signup, login, and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use persona_cart_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::middleware::{session_token, SESSION_COOKIE};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
    /// Session token; send it back as `Authorization: Bearer <token>` or rely on the cookie.
    pub token: String,
}

//=========================================================================================
// Helpers
//=========================================================================================

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

/// Opens a new login session for `user_id` and builds the cookie for it.
async fn open_session(state: &AppState, user_id: Uuid) -> Result<(String, String), ApiError> {
    let token = Uuid::new_v4().to_string();
    let ttl = state.session_ttl();
    state
        .db
        .create_auth_session(&token, user_id, Utc::now() + ttl)
        .await?;
    let cookie = session_cookie(&token, ttl.num_seconds());
    Ok((token, cookie))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created successfully", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password required".to_string()));
    }

    // 1. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })?
        .to_string();

    // 2. Create the account, then a session for it
    let user = state.db.create_user_with_email(&email, &password_hash).await?;
    let (token, cookie) = open_session(&state, user.user_id).await?;
    info!(user_id = %user.user_id, "Account created");

    let response = AuthResponse {
        user_id: user.user_id,
        email: user.email,
        token,
    };
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(response),
    ))
}

/// POST /auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());
    let email = req.email.trim().to_lowercase();

    // 1. Get the account by email
    let user_creds = match state.db.get_user_by_email(&email).await {
        Ok(creds) => creds,
        Err(PortError::NotFound(_)) => return Err(invalid()),
        Err(e) => return Err(e.into()),
    };

    // 2. Verify password
    let parsed_hash = PasswordHash::new(&user_creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        ApiError::Internal("Authentication error".to_string())
    })?;
    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid());
    }

    // 3. Open a session
    let (token, cookie) = open_session(&state, user_creds.user_id).await?;

    let response = AuthResponse {
        user_id: user_creds.user_id,
        email: user_creds.email,
        token,
    };
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /auth/logout - Logout and invalidate session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = session_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("No session found".to_string()))?;

    state.db.delete_auth_session(token).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie("", 0))],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_token_and_lifetime() {
        let cookie = session_cookie("abc", 60);
        assert!(cookie.starts_with("session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("Max-Age=60"));
    }
}

// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login, logout, and current-user handlers.
//!
//! Login verifies the Argon2id password hash, issues a session token, and
//! delivers it both ways at once: as an httponly cookie for browsers and
//! in the response body for bearer-header clients.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use passfort_core::PassfortError;
use passfort_crypto::password::verify_password;
use passfort_storage::queries::users;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, SESSION_COOKIE};
use crate::error::{ApiError, ErrorResponse};
use crate::server::AppState;

/// Request body for POST /api/v1/auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Account password. Held in a `SecretString` so it never appears in
    /// Debug output or logs.
    pub password: SecretString,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// The signed session token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

/// Response body for GET /api/v1/auth/me.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User identifier.
    pub id: Uuid,
    /// Account username.
    pub username: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// Simple message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// POST /api/v1/auth/login
///
/// A bad username and a bad password produce the same rejection so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), (StatusCode, Json<ErrorResponse>)> {
    let reject = || {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "incorrect username or password".to_string(),
            }),
        )
    };
    let internal = |e: PassfortError| ApiError(e).status_and_body();

    let user = users::get_user_by_username(&state.db, &body.username)
        .await
        .map_err(internal)?
        .ok_or_else(reject)?;

    let password_matches =
        verify_password(&body.password, &user.password_hash).map_err(internal)?;
    if !password_matches {
        return Err(reject());
    }

    let token = state
        .tokens
        .issue(&user.id.to_string())
        .map_err(internal)?;

    let max_age_secs = state.tokens.ttl().num_seconds();
    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build();

    tracing::info!(user_id = %user.id, "login succeeded");

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            access_token: token,
            token_type: "bearer".to_string(),
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Stateless tokens cannot be revoked server-side; logout only clears the
/// browser cookie. A captured bearer token stays valid until its expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build()),
        Json(MessageResponse {
            msg: "successfully logged out".to_string(),
        }),
    )
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = users::get_user(&state.db, user_id)
        .await?
        .ok_or(PassfortError::NotFound("user"))?;

    let created_at = user
        .created_at
        .parse::<DateTime<Utc>>()
        .map(|t| t.to_rfc3339())
        .unwrap_or(user.created_at);

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        created_at,
    }))
}

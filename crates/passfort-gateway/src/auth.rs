// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity resolution for the gateway.
//!
//! One `resolve` path with two ordered extraction strategies:
//! 1. The `access_token` session cookie (browser clients)
//! 2. `Authorization: Bearer <token>` (API clients and tests)
//!
//! Verification is centralized in [`TokenService`] regardless of where the
//! token came from, so both paths make identical trust decisions. Any
//! failure -- missing, malformed, forged, or expired token -- surfaces to
//! the caller as the same uniform 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use passfort_core::PassfortError;
use passfort_crypto::TokenService;
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::AppState;

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "access_token";

/// Pull the session token from a request: cookie first, bearer fallback.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Resolve the authenticated user id from request headers.
///
/// The returned id is the only value that may feed per-user key
/// derivation downstream.
pub fn resolve(headers: &HeaderMap, tokens: &TokenService) -> Result<Uuid, PassfortError> {
    let token = extract_token(headers).ok_or(PassfortError::Unauthenticated)?;

    let subject = tokens.verify(&token).map_err(|e| {
        // The distinction between invalid and expired is diagnostics only.
        tracing::debug!(reason = %e, "session token rejected");
        PassfortError::Unauthenticated
    })?;

    Uuid::parse_str(&subject).map_err(|_| {
        tracing::debug!("session token subject is not a valid user id");
        PassfortError::Unauthenticated
    })
}

/// The authenticated caller, as an axum extractor.
///
/// Use this in any handler that must be gated on identity:
/// ```ignore
/// async fn handler(user: AuthenticatedUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = resolve(&parts.headers, &state.tokens)?;
        Ok(Self(user_id))
    }
}

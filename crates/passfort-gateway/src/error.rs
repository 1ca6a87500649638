// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP mapping for `PassfortError`.
//!
//! All authentication failures collapse to one 401 body so callers learn
//! nothing about why a credential was rejected. Decryption failure maps to
//! 422: the caller is already authenticated and owns the record, so this
//! is an integrity problem worth alerting on, not an auth problem.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use passfort_core::PassfortError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Wrapper that turns `PassfortError` into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PassfortError);

impl From<PassfortError> for ApiError {
    fn from(err: PassfortError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// The status code and body this error renders to. Exposed for
    /// handlers that mix domain errors with endpoint-specific rejections.
    pub fn status_and_body(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, message) = match &self.0 {
            PassfortError::Unauthenticated
            | PassfortError::InvalidToken(_)
            | PassfortError::ExpiredToken => {
                tracing::debug!(reason = %self.0, "request rejected as unauthenticated");
                (StatusCode::UNAUTHORIZED, "not authenticated".to_string())
            }
            PassfortError::Decryption(_) => {
                tracing::error!(reason = %self.0, "stored secret failed decryption");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "stored secret could not be decrypted".to_string(),
                )
            }
            PassfortError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            PassfortError::Config(_) | PassfortError::Storage { .. } | PassfortError::Internal(_) => {
                tracing::error!(error = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status_and_body().into_response()
    }
}

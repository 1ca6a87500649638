// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless session tokens: signed, time-limited JWTs.
//!
//! A token carries the user identifier as `sub` and an absolute expiry as
//! `exp`, signed with HMAC-SHA256. Nothing is stored server-side, so a
//! token cannot be revoked before expiry -- only rotating the signing
//! secret invalidates outstanding sessions, and it invalidates all of them
//! at once.
//!
//! Verification pins the algorithm declared in config. A token whose header
//! declares anything else (including "none") is rejected regardless of its
//! signature.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use passfort_core::PassfortError;
use serde::{Deserialize, Serialize};

/// JWT claim set for a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier (authentication subject).
    pub sub: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// Issues and verifies session tokens against a single signing secret.
///
/// Construction happens once at startup; the service is then immutable and
/// safe to share across request handlers.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.header.alg)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    /// Create a token service from the configured signing secret,
    /// algorithm name, and time-to-live in minutes.
    ///
    /// Only HMAC algorithms are accepted; an unknown or asymmetric
    /// algorithm name is a configuration error.
    pub fn new(secret: &str, algorithm: &str, ttl_minutes: i64) -> Result<Self, PassfortError> {
        if secret.is_empty() {
            return Err(PassfortError::Config(
                "security.secret_key must not be empty".to_string(),
            ));
        }
        if ttl_minutes <= 0 {
            return Err(PassfortError::Config(format!(
                "security.token_ttl_minutes must be positive, got {ttl_minutes}"
            )));
        }

        let alg: Algorithm = algorithm.parse().map_err(|_| {
            PassfortError::Config(format!("security.algorithm `{algorithm}` is not recognized"))
        })?;
        if !matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(PassfortError::Config(format!(
                "security.algorithm `{algorithm}` is not an HMAC algorithm"
            )));
        }

        // Zero leeway: a token is expired the second its `exp` passes.
        let mut validation = Validation::new(alg);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(alg),
            validation,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    /// Configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` expiring after the configured ttl.
    pub fn issue(&self, subject: &str) -> Result<String, PassfortError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    /// Issue a token with an explicit ttl (may be zero or negative, which
    /// produces an already-expired token).
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, PassfortError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| PassfortError::Internal(format!("token encoding failed: {e}")))
    }

    /// Verify a token and return its subject.
    ///
    /// Fails with [`PassfortError::ExpiredToken`] when the expiry is in the
    /// past, and [`PassfortError::InvalidToken`] for everything else:
    /// malformed structure, signature mismatch, or an algorithm other than
    /// the configured one.
    pub fn verify(&self, token: &str) -> Result<String, PassfortError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => PassfortError::ExpiredToken,
                kind => PassfortError::InvalidToken(format!("{kind:?}")),
            }
        })?;
        // jsonwebtoken checks `exp < now`, which accepts a token during the
        // very second it expires. The expiry instant itself is not valid.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(PassfortError::ExpiredToken);
        }
        Ok(data.claims.sub)
    }
}

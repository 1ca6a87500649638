// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Passfort credential vault.

use thiserror::Error;

/// The primary error type used across all Passfort crates.
///
/// The authentication variants (`Unauthenticated`, `InvalidToken`,
/// `ExpiredToken`) are surfaced to HTTP callers uniformly as "not
/// authenticated" -- the distinction exists for diagnostics only.
/// `Decryption` is deliberately separate: it indicates integrity failure
/// on a record the caller already owns, not a credential problem.
#[derive(Debug, Error)]
pub enum PassfortError {
    /// Configuration errors (missing keys, malformed key material, unknown
    /// fields). Fatal at startup; the process must not start.
    #[error("configuration error: {0}")]
    Config(String),

    /// No credential was presented, or the presented credential could not
    /// be accepted. Never carries detail about *why* to avoid leaking
    /// oracle information to unauthenticated callers.
    #[error("not authenticated")]
    Unauthenticated,

    /// Token failed signature, structure, or algorithm checks.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token is structurally valid but past its expiry.
    #[error("token expired")]
    ExpiredToken,

    /// AEAD verification failed: wrong key, tampered ciphertext, or
    /// corrupted nonce. Message text never contains key or secret bytes.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested record does not exist or is not owned by the caller.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PassfortError {
    /// Wrap a storage-layer error.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_message_is_uniform() {
        // The caller-visible message must not hint at the failure cause.
        assert_eq!(PassfortError::Unauthenticated.to_string(), "not authenticated");
    }

    #[test]
    fn variants_construct() {
        let _config = PassfortError::Config("bad master key".into());
        let _invalid = PassfortError::InvalidToken("signature mismatch".into());
        let _expired = PassfortError::ExpiredToken;
        let _decrypt = PassfortError::Decryption("tag mismatch".into());
        let _storage = PassfortError::storage(std::io::Error::other("disk"));
        let _not_found = PassfortError::NotFound("vault item");
        let _internal = PassfortError::Internal("unexpected".into());
    }

    #[test]
    fn storage_error_preserves_source() {
        let err = PassfortError::storage(std::io::Error::other("disk gone"));
        assert!(err.to_string().contains("disk gone"));
    }
}

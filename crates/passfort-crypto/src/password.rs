// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id login-password hashing.
//!
//! These hashes gate authentication only. They are unrelated to the vault
//! master key: a user's login password never participates in deriving the
//! key that encrypts their secrets.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use passfort_core::PassfortError;
use secrecy::{ExposeSecret, SecretString};

/// Hash a password into a PHC-format string with a random salt.
pub fn hash_password(password: &SecretString) -> Result<String, PassfortError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| PassfortError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; a hash that fails to parse is a stored
/// data problem, not a wrong password, and surfaces as an internal error.
pub fn verify_password(password: &SecretString, stored_hash: &str) -> Result<bool, PassfortError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| PassfortError::Internal(format!("stored password hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let password = SecretString::from("correct horse battery staple");
        let hash = hash_password(&password).unwrap();
        assert!(verify_password(&password, &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password(&SecretString::from("right")).unwrap();
        assert!(!verify_password(&SecretString::from("wrong"), &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let password = SecretString::from("same password");
        let hash1 = hash_password(&password).unwrap();
        let hash2 = hash_password(&password).unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn malformed_stored_hash_is_an_internal_error() {
        let err = verify_password(&SecretString::from("pw"), "not-a-phc-string").unwrap_err();
        assert!(matches!(err, PassfortError::Internal(_)));
    }
}

// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for storage entities.
//!
//! Timestamps are stored as RFC 3339 text. `VaultItem` carries the
//! encrypted secret as the opaque `(password_encrypted, password_nonce)`
//! pair -- the storage layer never interprets either field.

use passfort_core::EncryptedSecret;
use uuid::Uuid;

/// A registered vault user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id PHC hash of the login password.
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Build a new user row with a fresh id and current timestamps.
    pub fn new(username: &str, password_hash: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// One stored credential, owned by exactly one user.
#[derive(Debug, Clone)]
pub struct VaultItem {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Display label for the account this credential belongs to.
    pub account_name: String,
    pub url: Option<String>,
    pub login: Option<String>,
    /// The encrypted secret in transport encoding.
    pub secret: EncryptedSecret,
    pub created_at: String,
    pub updated_at: String,
}

impl VaultItem {
    /// Build a new vault item row for `user_id` with a fresh id.
    pub fn new(
        user_id: Uuid,
        account_name: &str,
        url: Option<String>,
        login: Option<String>,
        secret: EncryptedSecret,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4(),
            user_id,
            account_name: account_name.to_string(),
            url,
            login,
            secret,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

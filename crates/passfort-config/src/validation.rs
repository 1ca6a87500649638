// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates the cryptographic-material invariants the serde layer cannot
//! express: the master key must decode to exactly 32 bytes, the signing
//! algorithm must be a supported HMAC variant, and the token ttl must be
//! positive. All violations are collected before reporting.

use passfort_crypto::{MasterKey, TokenService};

use crate::diagnostic::ConfigError;
use crate::model::PassfortConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or every collected error
/// (does not fail fast).
pub fn validate_config(config: &PassfortConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match &config.vault.master_key {
        None => errors.push(ConfigError::Validation {
            message: "vault.master_key is required (base64-encoded 32 bytes; \
                      generate one with `passfort keygen`)"
                .to_string(),
        }),
        Some(encoded) => {
            if let Err(e) = MasterKey::from_base64(encoded) {
                errors.push(ConfigError::Validation {
                    message: e.to_string(),
                });
            }
        }
    }

    match &config.security.secret_key {
        None => errors.push(ConfigError::Validation {
            message: "security.secret_key is required".to_string(),
        }),
        Some(secret) => {
            // TokenService::new performs the algorithm and ttl checks.
            if let Err(e) = TokenService::new(
                secret,
                &config.security.algorithm,
                config.security.token_ttl_minutes,
            ) {
                errors.push(ConfigError::Validation {
                    message: e.to_string(),
                });
            }
        }
    }

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.bootstrap.initial_username.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bootstrap.initial_username must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

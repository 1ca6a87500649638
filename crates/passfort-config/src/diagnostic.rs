// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error types and startup rendering.
//!
//! Config problems are fatal: they are rendered as a plain list on stderr
//! and the process exits before binding a socket or touching the database.

use thiserror::Error;

/// A single configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Deserialization failure (bad TOML, unknown field, type mismatch).
    #[error("{message}")]
    Parse { message: String },

    /// Semantic validation failure on a deserialized value.
    #[error("{message}")]
    Validation { message: String },
}

/// Render config errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    eprintln!("passfort: configuration is invalid:");
    for error in errors {
        eprintln!("  - {error}");
    }
}

/// Convert a figment extraction error into config errors.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_message() {
        let err = ConfigError::Validation {
            message: "vault.master_key is required".to_string(),
        };
        assert_eq!(err.to_string(), "vault.master_key is required");
    }
}

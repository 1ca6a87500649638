// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Passfort vault service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a typoed key is
//! rejected at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Passfort configuration.
///
/// Loaded from TOML files with environment variable overrides. Sections
/// with secrets carry no compiled defaults -- `security.secret_key` and
/// `vault.master_key` must be provided or the process refuses to start.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PassfortConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Session token signing settings.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Vault encryption settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Initial admin account seeded at first startup.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty disables cross-origin access.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Session token signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Symmetric token signing secret. Required.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Signing algorithm name. Must be an HMAC algorithm.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Token time-to-live in minutes.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            algorithm: default_algorithm(),
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_token_ttl_minutes() -> i64 {
    60 * 24 * 7 // 7 days
}

/// Vault encryption configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Base64-encoded 32-byte master key. Required.
    #[serde(default)]
    pub master_key: Option<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "passfort.db".to_string()
}

/// Initial admin account configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Username of the admin account created on first start.
    #[serde(default = "default_initial_username")]
    pub initial_username: String,

    /// Password of the admin account created on first start.
    #[serde(default = "default_initial_password")]
    pub initial_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            initial_username: default_initial_username(),
            initial_password: default_initial_password(),
        }
    }
}

fn default_initial_username() -> String {
    "admin".to_string()
}

fn default_initial_password() -> String {
    "changeme".to_string()
}
